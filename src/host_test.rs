use super::*;
use crate::extract::Extractor;

#[tokio::test]
async fn text_document_extracts_trimmed_text() {
    let document = TextDocument::new("\n  I am thrilled  \n");
    assert_eq!(Extractor::default().extract(&document).await.unwrap(), "I am thrilled");
}

#[tokio::test]
async fn text_document_has_no_clipboard() {
    let document = TextDocument::new("x");
    assert!(document.trigger_copy().await.is_err());
    assert!(document.read_clipboard().await.is_err());
    assert_eq!(document.editor_surface_text().await.unwrap(), None);
}
