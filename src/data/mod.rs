//! Bulk import of question sheets.

mod loader;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::store::{QuestionStore, StoreError, StoreStats};

pub use loader::{LoadError, load_questions_from_json};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Replace the whole question bank with the contents of a JSON sheet.
///
/// Nothing is written unless every row loads.
pub fn import_questions<P: AsRef<Path>>(
    store: &dyn QuestionStore,
    path: P,
) -> Result<StoreStats, ImportError> {
    let path = path.as_ref();
    let questions = load_questions_from_json(path)?;
    info!(path = %path.display(), rows = questions.len(), "loaded question sheet");

    let imported = store.replace_all(questions)?;
    let stats = store.stats()?;
    info!(
        imported,
        subjects = %stats.subjects.join(", "),
        test_types = %stats.uses.join(", "),
        "import finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::{AnswerLabel, NewQuestion};
    use crate::store::InMemoryQuestionStore;

    fn existing() -> NewQuestion {
        NewQuestion {
            question: "old".to_string(),
            subject: "Legacy".to_string(),
            r#use: "Old test".to_string(),
            correct: AnswerLabel::A,
            responses: ["a".to_string(), String::new(), String::new(), String::new()],
        }
    }

    #[test]
    fn test_import_replaces_existing_questions() {
        let store = InMemoryQuestionStore::with_questions(vec![existing()]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question":"q1","subject":"Docker","use":"Positioning test","correct":"A","responseA":"a"}},
               {{"question":"q2","subject":"Databases","use":"Positioning test","correct":"B","responseA":"a","responseB":"b"}}]"#
        )
        .unwrap();

        let stats = import_questions(&store, file.path()).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.subjects, vec!["Databases", "Docker"]);
        assert_eq!(stats.uses, vec!["Positioning test"]);
    }

    #[test]
    fn test_failed_import_keeps_existing_questions() {
        let store = InMemoryQuestionStore::with_questions(vec![existing()]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question":"q1","subject":"Docker","use":"Positioning test","correct":"?","responseA":"a"}}]"#
        )
        .unwrap();

        assert!(matches!(
            import_questions(&store, file.path()),
            Err(ImportError::Load(LoadError::InvalidRow { row: 1, .. }))
        ));
        assert_eq!(store.len(), 1);
    }
}
