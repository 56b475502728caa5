use crate::errors::AppError;

/// A document handed to the diet import. Implementations are responsible for
/// opening the resource; a document that cannot be opened never gets this far.
pub trait Document: Send + Sync {
    /// Best-effort text per page: one entry per page, an empty string for a
    /// page with no extractable text. An empty vec means zero pages.
    fn page_texts(&self) -> Vec<String>;
}

/// PDF-backed document. Extraction happens once, at open time.
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| AppError::DocumentUnreadable(e.to_string()))?;
        Ok(Self { pages })
    }
}

impl Document for PdfDocument {
    fn page_texts(&self) -> Vec<String> {
        self.pages.clone()
    }
}

/// Concatenates the document text, enforcing the empty-document rules.
pub fn extract_text(doc: &dyn Document) -> Result<String, AppError> {
    let pages = doc.page_texts();
    if pages.is_empty() {
        return Err(AppError::DocumentEmpty);
    }
    let text = pages.concat();
    if text.trim().is_empty() {
        return Err(AppError::NoTextFound);
    }
    Ok(text)
}

#[cfg(test)]
pub(crate) struct FakeDocument {
    pub pages: Vec<String>,
}

#[cfg(test)]
impl Document for FakeDocument {
    fn page_texts(&self) -> Vec<String> {
        self.pages.clone()
    }
}
