//! `rules` command: check an exclusion rules file before deploying it.

use std::path::Path;

use anyhow::Context;

/// Load `path`, validate it, and print a summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, has
/// unknown keys, or contains blank entries.
pub(crate) fn run_rules(path: &Path) -> anyhow::Result<()> {
    let rules = sweetmap_core::load_exclusion_rules(path)
        .with_context(|| format!("exclusion rules at {} are invalid", path.display()))?;

    println!("{}", summarize(path, &rules));
    Ok(())
}

fn summarize(path: &Path, rules: &sweetmap_core::ExclusionRules) -> String {
    let mut out = format!(
        "{}: {} excluded categories, {} excluded name patterns",
        path.display(),
        rules.excluded_categories().len(),
        rules.excluded_name_patterns().len()
    );
    for category in rules.excluded_categories() {
        out.push_str(&format!("\n  category  {category}"));
    }
    for pattern in rules.excluded_name_patterns() {
        out.push_str(&format!("\n  name      {pattern}"));
    }
    out
}
