use super::*;
use crate::net::types::Paper;

fn list_of(count: u64, total: u64, size: u64) -> PaperList {
    let data = (1..=count)
        .map(|id| {
            serde_json::from_value::<Paper>(serde_json::json!({
                "id": id,
                "title": format!("Paper {id}"),
                "abstract": "",
                "status": "pending",
                "userId": 1,
                "categoryId": 1,
                "user": { "id": 1, "name": "Ada", "email": "ada@example.com" }
            }))
            .unwrap()
        })
        .collect();
    PaperList { data, total, size, next_page: None, prev_page: None }
}

#[test]
fn summary_counts_rows_on_the_current_page() {
    assert_eq!(list_summary(&list_of(10, 42, 10), 2), "Showing 11-20 of 42 papers");
    assert_eq!(list_summary(&list_of(2, 42, 10), 5), "Showing 41-42 of 42 papers");
}

#[test]
fn summary_for_empty_list() {
    assert_eq!(list_summary(&list_of(0, 0, 10), 1), "No papers found");
}

#[test]
fn summary_saturates_on_absurd_page_size() {
    assert_eq!(
        list_summary(&list_of(1, 5, u64::MAX), 3),
        format!("Showing {0}-{0} of 5 papers", u64::MAX)
    );
}
