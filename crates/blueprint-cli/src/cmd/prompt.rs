use super::open_session;
use crate::output::print_json;
use blueprint_core::prompt::build_prompt;
use blueprint_core::types::DocType;
use std::path::Path;
use uuid::Uuid;

pub fn run(
    root: &Path,
    draft: Option<Uuid>,
    project: Option<Uuid>,
    doc: &str,
    json: bool,
) -> anyhow::Result<()> {
    let doc: DocType = doc.parse()?;
    let session = open_session(root, draft, project)?;
    let prompt = build_prompt(session.data(), doc);

    if json {
        print_json(&prompt)
    } else {
        println!("# Instructions\n\n{}\n\n# Content\n\n{}", prompt.instructions, prompt.content);
        Ok(())
    }
}
