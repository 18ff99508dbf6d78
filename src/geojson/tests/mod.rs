#[cfg(test)]
mod document_tests;
