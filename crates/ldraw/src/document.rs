//! Parsed documents and multipart containers.

use std::collections::HashMap;

use crate::elements::{BfcCertification, Command, Header, Meta, PartReference};
use crate::PartAlias;

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub name: String,
    pub description: String,
    pub author: String,
    pub bfc: BfcCertification,
    pub headers: Vec<Header>,
    pub commands: Vec<Command>,
}

impl Document {
    pub fn iter_refs(&self) -> impl Iterator<Item = &PartReference> {
        self.commands.iter().filter_map(|command| match command {
            Command::PartReference(reference) => Some(reference),
            _ => None,
        })
    }

    fn is_drawable(command: &Command) -> bool {
        !matches!(command, Command::Meta(_))
    }

    /// Number of build steps. `0 STEP` metas partition the command list; a
    /// document without steps counts as one, and a trailing `STEP` with
    /// nothing after it does not add an empty step.
    pub fn step_count(&self) -> usize {
        let mut steps = 1;
        let mut drawable_in_tail = false;
        for command in &self.commands {
            if matches!(command, Command::Meta(Meta::Step)) {
                steps += 1;
                drawable_in_tail = false;
            } else if Self::is_drawable(command) {
                drawable_in_tail = true;
            }
        }
        if steps > 1 && !drawable_in_tail {
            steps -= 1;
        }
        steps
    }

    /// Commands belonging to the first `step` build steps (1-based).
    pub fn commands_through_step(&self, step: usize) -> impl Iterator<Item = &Command> {
        let mut seen = 0;
        self.commands.iter().take_while(move |command| {
            if matches!(command, Command::Meta(Meta::Step)) {
                seen += 1;
            }
            seen < step
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultipartDocument {
    pub body: Document,
    pub subparts: HashMap<PartAlias, Document>,
}

impl MultipartDocument {
    pub fn subpart(&self, alias: &PartAlias) -> Option<&Document> {
        self.subparts.get(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorReference;
    use crate::elements::Line;
    use crate::Vector4;

    fn line() -> Command {
        Command::Line(Line {
            color: ColorReference::Current,
            a: Vector4::new(0.0, 0.0, 0.0, 1.0),
            b: Vector4::new(1.0, 0.0, 0.0, 1.0),
        })
    }

    fn document(commands: Vec<Command>) -> Document {
        Document {
            name: String::new(),
            description: String::new(),
            author: String::new(),
            bfc: BfcCertification::NotApplicable,
            headers: vec![],
            commands,
        }
    }

    #[test]
    fn step_count_without_steps() {
        assert_eq!(document(vec![]).step_count(), 1);
        assert_eq!(document(vec![line()]).step_count(), 1);
    }

    #[test]
    fn step_count_with_steps() {
        let doc = document(vec![line(), Command::Meta(Meta::Step), line()]);
        assert_eq!(doc.step_count(), 2);
    }

    #[test]
    fn trailing_step_is_not_counted() {
        let doc = document(vec![line(), Command::Meta(Meta::Step)]);
        assert_eq!(doc.step_count(), 1);

        let doc = document(vec![
            line(),
            Command::Meta(Meta::Step),
            line(),
            Command::Meta(Meta::Step),
        ]);
        assert_eq!(doc.step_count(), 2);
    }

    #[test]
    fn commands_through_step_slices_prefix() {
        let doc = document(vec![line(), Command::Meta(Meta::Step), line(), line()]);
        assert_eq!(doc.commands_through_step(1).count(), 1);
        assert_eq!(doc.commands_through_step(2).count(), 4);
    }
}
