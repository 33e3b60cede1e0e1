//! Help and version text.

use plusopt_metadata::ProgramInfo;

use crate::registry::Registry;

/// Width the long-name column is padded to.
const LONG_COLUMN_WIDTH: usize = 32;

/// `"{name} - {version}\n"`.
pub fn render_version(info: &ProgramInfo) -> String {
    format!("{} - {}\n", info.name, info.version)
}

/// Version line, description, then one line per reachable option:
/// `-c/--long<padding>\thelp`.
///
/// Options whose short character has since been given to another option
/// are listed without it.
pub fn render_help(info: &ProgramInfo, registry: &Registry) -> String {
    let mut out = render_version(info);
    if !info.description.trim().is_empty() {
        out.push_str(info.description.trim_end());
        out.push('\n');
    }

    for slot in registry.reachable() {
        let d = registry.descriptor(slot);
        if registry.owns_short(slot) {
            out.push_str(&format!("-{}/", d.short()));
        } else {
            out.push_str("   ");
        }
        out.push_str(&format!(
            "--{:width$}\t{}\n",
            d.long(),
            d.help(),
            width = LONG_COLUMN_WIDTH
        ));
    }

    out
}
