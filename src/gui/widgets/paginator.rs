//! Pagination controls under the review tables.

use eframe::egui::{self, RichText};

use crate::gui::theme::AppTheme;
use crate::paging::Pager;

/// Render Prev / numbered pages / Next for `count` items.
///
/// Boundary policy: Prev is disabled on page 1, Next on the last page, and no
/// out-of-range page is reachable through these controls. Returns `true` if
/// the page changed (the caller only re-slices; no network call is needed).
pub fn paginator(ui: &mut egui::Ui, theme: &AppTheme, pager: &mut Pager, count: usize) -> bool {
    let total = pager.total_pages(count);
    if total <= 1 {
        return false;
    }

    let mut changed = false;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(pager.has_prev(), theme.button_secondary("< Prev"))
            .clicked()
        {
            pager.prev();
            changed = true;
        }

        for page in 1..=total {
            let current = page == pager.page();
            let label = if current {
                RichText::new(page.to_string()).color(theme.primary).strong()
            } else {
                RichText::new(page.to_string()).color(theme.text_secondary)
            };
            if ui.selectable_label(current, label).clicked() && !current {
                pager.set_page(page, count);
                changed = true;
            }
        }

        if ui
            .add_enabled(pager.has_next(count), theme.button_secondary("Next >"))
            .clicked()
        {
            pager.next(count);
            changed = true;
        }

        ui.label(
            RichText::new(format!("{} of {} pages · {} records", pager.page(), total, count))
                .small()
                .color(theme.text_secondary),
        );
    });
    changed
}
