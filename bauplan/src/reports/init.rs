//! Init command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub struct InitReport {
    pub path: PathBuf,
    /// False when a manifest already existed and was left alone.
    pub created: bool,
}

impl Report for InitReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.created {
            out.warning(&format!(
                "warning: {} already exists, leaving it unchanged",
                self.path.display()
            ));
            return;
        }

        out.added_item(&self.path.display().to_string());
        out.newline();
        out.preformatted("Next steps:");
        out.list_item("point [source].universe at your adapter's type dump");
        out.list_item("bauplan check");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::render_to_string;

    #[test]
    fn test_render_skipped() {
        let report = InitReport {
            path: PathBuf::from("bauplan.toml"),
            created: false,
        };

        assert_eq!(
            render_to_string(&report),
            "! warning: bauplan.toml already exists, leaving it unchanged\n"
        );
    }
}
