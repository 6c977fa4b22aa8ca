use crate::Catalog;

/// Renders the catalog as a bordered fixed-width table.
///
/// An empty catalog renders as a single placeholder line instead of a
/// table. Row indices are 1-based and assigned at render time, not stored.
/// Rendering is deterministic and leaves the catalog untouched.
#[must_use]
pub fn render(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "The route list is empty.\n".to_string();
    }

    let border = format!(
        "+-{}-+-{}-+-{}-+-{}-+",
        "-".repeat(4),
        "-".repeat(30),
        "-".repeat(20),
        "-".repeat(8)
    );

    let mut lines = Vec::with_capacity(catalog.len() + 4);
    lines.push(border.clone());
    lines.push(format!(
        "| {:^4} | {:^30} | {:^20} | {:^8} |",
        "#", "Start", "Finish", "Number"
    ));
    lines.push(border.clone());

    for (index, route) in catalog.iter().enumerate() {
        lines.push(format!(
            "| {:>4} | {:<30} | {:<20} | {:>8} |",
            index + 1,
            route.start(),
            route.finish(),
            route.number()
        ));
    }

    lines.push(border);
    lines.join("\n") + "\n"
}
