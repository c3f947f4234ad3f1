use crate::format::Style;

/// Prints sample styled lines so an operator can verify terminal colors.
/// Colors are forced on; the point is to see the escape codes rendered.
pub fn execute() {
    let style = Style::new(true);

    println!("Code testing...");
    println!("{}", style.green("Color test."));
    println!("{}", style.on_red("Color test."));
}
