//! Parameter listing command.

use clap::Args;
use funky_core::ParamId;
use funky_engine::WahParams;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only the parameter with this string id
    id: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params = WahParams::new();
    let descriptors = params.descriptors();

    let selected: Vec<_> = match &args.id {
        Some(id) => {
            let index = params
                .index_by_string_id(id)
                .ok_or_else(|| anyhow::anyhow!("unknown parameter '{}'", id))?;
            vec![descriptors[index]]
        }
        None => descriptors.to_vec(),
    };

    println!("Parameters\n");
    println!(
        "  {:<18} {:>5}  {:<20} {:>10} {:>10} {:>12}",
        "ID", "Num", "Name", "Min", "Max", "Default"
    );
    for desc in selected {
        let ParamId(num) = desc.id;
        println!(
            "  {:<18} {:>5}  {:<20} {:>10} {:>10} {:>12}",
            desc.string_id,
            num,
            desc.name,
            desc.format_value(desc.min),
            desc.format_value(desc.max),
            desc.format_value(desc.default)
        );
        if !desc.labels.is_empty() {
            let choices: Vec<String> = desc
                .labels
                .iter()
                .enumerate()
                .map(|(i, label)| format!("{i}={label}"))
                .collect();
            println!("  {:<18} {:>5}  {}", "", "", choices.join(", "));
        }
    }

    Ok(())
}
