use eframe::egui::{self, Context, Key, RichText, TextEdit};

const EXAMPLE_QUERIES: [&str; 3] = [
    "Check the financial risk profile of Jordan Hale",
    "Map corporate ties of Dana Whitfield",
    "Court history for Marcus Webb and associates",
];

/// Centered query screen; returns the submitted query, if any.
pub(in crate::app) fn query_screen(ctx: &Context, input: &mut String) -> Option<String> {
    let mut submitted = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading("Risk relationship explorer");
            ui.add_space(6.0);
            ui.label("Map court cases, family ties, associates and corporate links for a subject.");
            ui.add_space(18.0);

            let response = ui.add(
                TextEdit::singleline(input)
                    .desired_width(540.0)
                    .hint_text(EXAMPLE_QUERIES[0]),
            );
            let submit_key =
                response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

            ui.add_space(10.0);
            let clicked = ui.button("Investigate").clicked();
            if (submit_key || clicked) && !input.trim().is_empty() {
                submitted = Some(input.trim().to_owned());
            }

            ui.add_space(26.0);
            ui.label(RichText::new("Try one of these").weak());
            ui.add_space(4.0);
            for example in EXAMPLE_QUERIES {
                if ui.link(example).clicked() {
                    submitted = Some(example.to_owned());
                }
            }
        });
    });

    submitted
}

pub(in crate::app) fn loading_screen(ctx: &Context, query: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            if query.trim().is_empty() {
                ui.heading("Loading graph dataset...");
            } else {
                ui.heading(format!("Investigating {query}..."));
            }
            ui.add_space(8.0);
            ui.spinner();
        });
    });
}

/// Error screen with a retry button; returns true when retry was clicked.
pub(in crate::app) fn error_screen(ctx: &Context, error: &str) -> bool {
    let mut retry = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Failed to build the relationship graph");
        ui.add_space(6.0);
        ui.label(error);
        ui.add_space(10.0);
        if ui.button("Retry").clicked() {
            retry = true;
        }
    });

    retry
}
