use eframe::egui::{self, vec2, Align, Color32, Context, Layout, RichText, Sense, Ui};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::data::{FindingStatus, NodeGroup};
use crate::util::ellipsize;

use super::super::render_utils::group_color;
use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.top_bar(ui));

        egui::SidePanel::right("report_panel")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.side_panel(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn top_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("riskviz");
            ui.separator();
            if self.query.trim().is_empty() {
                ui.label("local dataset");
            } else {
                ui.label(ellipsize(&self.query, 64));
            }
            ui.separator();
            ui.label(format!("{} nodes", self.graph.node_count()));
            ui.label(format!("{} links", self.graph.links().len()));
            if self.graph.dropped_link_count() > 0 {
                ui.label(
                    RichText::new(format!("{} dropped", self.graph.dropped_link_count()))
                        .color(Color32::from_rgb(240, 160, 90)),
                );
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("New query").clicked() {
                    self.new_query_requested = true;
                }
                if ui.button("Reset view").clicked() {
                    self.viewport.reset();
                }
            });
        });
    }

    fn side_panel(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        self.search_section(ui);
        ui.separator();
        self.selection_section(ui);
        ui.separator();
        self.report_section(ui);
        ui.separator();
        legend_section(ui);
    }

    fn search_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Find a node").strong());
        let response = ui.text_edit_singleline(&mut self.search);
        if response.changed() {
            self.recompute_search_matches();
        }
        if !self.search.trim().is_empty() {
            let count = self.search_matches.len();
            if count == 1 {
                ui.label("1 match");
            } else {
                ui.label(format!("{count} matches"));
            }
        }
    }

    fn recompute_search_matches(&mut self) {
        self.search_matches.clear();
        let query = self.search.trim();
        if query.is_empty() {
            return;
        }

        let matcher = SkimMatcherV2::default();
        for (index, node) in self.graph.nodes().iter().enumerate() {
            if fuzzy_match_score(&matcher, &node.id, query).is_some() {
                self.search_matches.insert(index);
            }
        }
    }

    fn selection_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Selection").strong());

        let Some(selected_id) = self.selected.clone() else {
            ui.label(RichText::new("Click a node to inspect it.").weak());
            return;
        };

        // selection always comes from live nodes, so both lookups resolve
        let Some(index) = self.graph.index_of(&selected_id) else {
            return;
        };
        let Some(node) = self.graph.resolve(&selected_id) else {
            return;
        };
        ui.label(RichText::new(node.id.as_str()).strong());
        ui.label(node.group.label());
        ui.label(RichText::new(node.group.description()).weak());
        let neighbor_count = self.graph.neighbors(&selected_id).len();
        if neighbor_count == 1 {
            ui.label("1 direct connection");
        } else {
            ui.label(format!("{neighbor_count} direct connections"));
        }

        let mut relations = Vec::new();
        for link in self.graph.links() {
            if link.source == index {
                relations.push((
                    self.graph.nodes()[link.target].id.clone(),
                    link.relationship.clone(),
                ));
            } else if link.target == index {
                relations.push((
                    self.graph.nodes()[link.source].id.clone(),
                    link.relationship.clone(),
                ));
            }
        }

        if !relations.is_empty() {
            ui.add_space(4.0);
            ui.label(RichText::new("Direct relations").strong());
            let mut next_selection = None;
            for (other, relationship) in &relations {
                if ui
                    .link(format!("{relationship}: {}", ellipsize(other, 32)))
                    .clicked()
                {
                    next_selection = Some(other.clone());
                }
            }
            if let Some(next) = next_selection {
                self.selected = Some(next);
            }
        }

        ui.add_space(4.0);
        if ui.button("Clear selection").clicked() {
            self.selected = None;
        }
    }

    fn report_section(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Investigation report").strong());

        let Some(report) = &self.report else {
            ui.label(RichText::new("Dataset supplied externally; no report available.").weak());
            return;
        };

        ui.label(report.summary.as_str());
        ui.add_space(4.0);
        for finding in &report.findings {
            let (tag, color) = match finding.status {
                FindingStatus::Found => ("found", Color32::from_rgb(240, 160, 90)),
                FindingStatus::Clear => ("clear", Color32::from_rgb(120, 200, 130)),
            };
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("[{tag}]")).color(color).monospace());
                ui.label(RichText::new(finding.source).strong());
            });
            ui.label(RichText::new(finding.content.as_str()).weak());
            ui.add_space(2.0);
        }

        ui.add_space(4.0);
        ui.label(format!("Risk level: {}", report.risk_level.label()));
        ui.label(RichText::new(report.recommendation.as_str()).italics());
    }
}

fn legend_section(ui: &mut Ui) {
    ui.label(RichText::new("Legend").strong());
    for group in NodeGroup::ALL {
        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter().circle_filled(swatch.center(), 5.0, group_color(group));
            ui.label(group.label());
        });
    }
}
