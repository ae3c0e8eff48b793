use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let reader = ctx.reader(ctx.config())?;
    let language = ctx.language;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Cards", "Positions"]);

    for spread in reader.spreads().iter() {
        let positions: Vec<&str> = spread
            .positions
            .iter()
            .map(|p| p.name.get(language))
            .collect();
        table.add_row(vec![
            spread.key.clone(),
            spread.name.get(language).to_string(),
            spread.card_count.to_string(),
            positions.join(", "),
        ]);
    }

    println!("{table}");

    Ok(())
}
