use console::{measure_text_width, style};

/// Prints the boxed, colorized banner shown at startup.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so ANSI codes in the content do not
/// distort the padding. Borders are styled separately from the text.
///
/// # Examples
///
/// ```no_run
/// git_cleaner::banner::print_banner();
/// ```
pub fn print_banner() {
    println!();
    for row in framed(&banner_lines()) {
        println!("{row}");
    }
    println!();
}

/// Wraps `lines` in a box one space wider than the widest visible line on
/// each side, returning the rows top border first.
///
/// Every row has the same visible width whatever styling `lines` carry.
fn framed(lines: &[String]) -> Vec<String> {
    let inner = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0) + 2;
    let edge = |text: String| style(text).blue().bold().to_string();

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(edge(format!("╔{}╗", "═".repeat(inner))));
    for line in lines {
        let fill = " ".repeat(inner - 1 - measure_text_width(line));
        rows.push(format!("{}{line}{fill}{}", edge("║ ".to_string()), edge("║".to_string())));
    }
    rows.push(edge(format!("╚{}╝", "═".repeat(inner))));
    rows
}

/// Lines inside the banner box, in display order.
///
/// The warning line carries ANSI styling; measure visible width rather
/// than `str::len()`.
fn banner_lines() -> Vec<String> {
    vec![
        style("Git Cleaner - Simplify your Git history!")
            .bold()
            .to_string(),
        "Removing files from Git history safely and effectively.".to_string(),
        String::new(),
        style("Every branch and tag is rewritten; back up before confirming.")
            .yellow()
            .to_string(),
    ]
}
