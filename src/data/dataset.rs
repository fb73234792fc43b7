use crate::data::chunker::Chunker;
use crate::domain::document::Document;
use crate::domain::example::Example;

/// Every example produced from a corpus, in document-then-chunk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleDataset {
    examples: Vec<Example>,
}

impl ExampleDataset {
    /// Run the chunker over each document and flatten the results.
    pub fn from_documents(docs: &[Document], chunker: &Chunker) -> Self {
        let examples: Vec<Example> = docs
            .iter()
            .flat_map(|doc| chunker.chunks(&doc.text).map(Example::new))
            .collect();

        tracing::info!("Created {} training chunks.", examples.len());
        Self { examples }
    }

    pub fn len(&self) -> usize { self.examples.len() }

    pub fn into_examples(self) -> Vec<Example> { self.examples }
}
