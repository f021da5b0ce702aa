//! Locally computed answers for common aggregate questions.
//!
//! Questions about average age, regions, or record counts are answered from
//! the store without going upstream. Matching is keyword-based on the
//! lowercased question, the same shortcuts the original service offered.

use crate::store::SampleStore;

/// Try to answer a question from store aggregates alone.
/// Returns None when the question needs the generative provider.
#[must_use]
pub fn local_answer(question: &str, store: &SampleStore) -> Option<String> {
    if store.is_empty() {
        return Some(
            "No data has been uploaded yet. Please upload a CSV file first.".to_string(),
        );
    }

    let question = question.to_lowercase();

    if question.contains("average") && question.contains("age") {
        let average = store.average_age()?;
        return Some(format!(
            "The average age in the uploaded data is {average:.2} years."
        ));
    }

    if question.contains("region") {
        let summary = store
            .region_counts()
            .iter()
            .map(|(region, count)| format!("{region}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Some(format!("The data includes the following regions: {summary}"));
    }

    if ["many", "count", "number", "records", "samples"]
        .iter()
        .any(|kw| question.contains(kw))
    {
        return Some(format!(
            "There are {} records in the uploaded data.",
            store.len()
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::SampleRecord;

    fn fixture_store() -> SampleStore {
        let mut store = SampleStore::new();
        store.insert(SampleRecord::new("S001", "Siberia", 20000, "t1"));
        store.insert(SampleRecord::new("S002", "Altai", 40000, "t2"));
        store
    }

    #[test]
    fn test_empty_store_answer() {
        let store = SampleStore::new();
        let answer = local_answer("what is the average age?", &store).unwrap();
        assert!(answer.contains("No data"));
    }

    #[test]
    fn test_average_age_answer() {
        let store = fixture_store();
        let answer = local_answer("What is the average age?", &store).unwrap();
        assert!(answer.contains("30000.00"));
    }

    #[test]
    fn test_region_answer() {
        let store = fixture_store();
        let answer = local_answer("Which regions are covered?", &store).unwrap();
        assert!(answer.contains("Altai: 1"));
        assert!(answer.contains("Siberia: 1"));
    }

    #[test]
    fn test_count_answer() {
        let store = fixture_store();
        let answer = local_answer("How many samples are there?", &store).unwrap();
        assert!(answer.contains("2 records"));
    }

    #[test]
    fn test_unmatched_question_defers() {
        let store = fixture_store();
        assert!(local_answer("Tell me about neanderthal admixture", &store).is_none());
    }
}
