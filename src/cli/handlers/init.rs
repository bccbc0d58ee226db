use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::store::{CONFIG_FILE, STORE_DIR};

const CONFIG_TEMPLATE: &str = r#"[project]
name = "{name}"
# Name given to the default section in a fresh store.
default_section_name = "Tasks"

[trash]
# How many days deleted tasks survive before `ka clean` may purge them.
retention_days = 7
"#;

/// Infer a project name from a directory name: replace hyphens with spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let store_dir = cwd.join(STORE_DIR);

    if store_dir.is_dir() {
        return Err("kario store already exists in ./kario/".into());
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Tasks".to_string())
    });

    fs::create_dir_all(&store_dir)?;
    fs::write(
        store_dir.join(CONFIG_FILE),
        CONFIG_TEMPLATE.replace("{name}", &name),
    )?;

    println!("Initialized kario store: {}", name);
    Ok(())
}
