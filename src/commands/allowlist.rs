use std::fs;
use std::path::Path;

use crate::allowlist::AllowList;
use crate::cli::{AllowListAction, AllowListArgs, Cli};
use crate::config::{ConfigKey, ConfigStore, FileSystem};
use crate::error::{BatchError, Result};
use crate::output::{print_batch_error, print_warning_full};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::resolve_allow_list;

#[must_use]
pub fn run_allowlist(args: &AllowListArgs, cli: &Cli) -> i32 {
    let store = ConfigStore::new(cli.config.clone());
    match run_allowlist_impl(&args.action, &store) {
        Ok(report) => {
            if !cli.quiet && !report.irregular.is_empty() {
                print_warning_full(
                    &format!("{} entries do not look like SKU codes", report.irregular.len()),
                    Some(report.irregular.join("\n").as_str()),
                    Some("entries still match exactly; check them for typos"),
                );
            }
            print!("{}", report.output);
            EXIT_SUCCESS
        }
        Err(e) => {
            print_batch_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// What an `allowlist` action produced.
#[derive(Debug, Default)]
pub(crate) struct AllowListReport {
    pub output: String,
    pub irregular: Vec<String>,
}

/// Performs an `allowlist` action.
///
/// # Errors
/// Returns an error if a list or script cannot be read, the script declares no
/// list, or the imported list or config cannot be written.
pub(crate) fn run_allowlist_impl<F: FileSystem>(
    action: &AllowListAction,
    store: &ConfigStore<F>,
) -> Result<AllowListReport> {
    match action {
        AllowListAction::Show {
            allow_list,
            irregular,
        } => {
            let list = resolve_allow_list(allow_list.as_deref(), &store.load())?;
            let odd: Vec<String> = list.irregular_entries().into_iter().map(str::to_string).collect();
            let output = if *irregular {
                odd.iter().map(|id| format!("{id}\n")).collect()
            } else {
                list.to_list_file()
            };
            Ok(AllowListReport {
                output,
                irregular: if *irregular { Vec::new() } else { odd },
            })
        }
        AllowListAction::Import {
            script,
            output,
            save,
        } => {
            let list = AllowList::import_script(script)?;
            let Some(target) = output else {
                return Ok(AllowListReport {
                    output: list.to_list_file(),
                    ..AllowListReport::default()
                });
            };
            write_list(&list, target)?;
            if *save {
                let mut config = store.load();
                config.set(
                    ConfigKey::AllowListPath,
                    Some(target.to_string_lossy().into_owned()),
                );
                store.save(&config)?;
            }
            Ok(AllowListReport {
                output: format!("Imported {} codes into {}\n", list.len(), target.display()),
                ..AllowListReport::default()
            })
        }
    }
}

fn write_list(list: &AllowList, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BatchError::io(e, parent, "create"))?;
    }
    fs::write(target, list.to_list_file()).map_err(|e| BatchError::io(e, target, "write"))
}

#[cfg(test)]
#[path = "allowlist_tests.rs"]
mod tests;
