mod common;

use common::{create_member, setup};
use shared::error::ErrorCode;
use shared::models::MemberSearch;
use std::collections::HashSet;

fn page(page_number: i64, page_size: i64) -> MemberSearch {
    MemberSearch {
        page_number,
        page_size,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_twenty_five_members_in_pages_of_ten() {
    let (_db, services) = setup().await;
    for n in 0..25 {
        create_member(&services, n).await;
    }

    let mut seen = HashSet::new();
    for (number, expected) in [(1, 10), (2, 10), (3, 5)] {
        let result = services.members.search_members(&page(number, 10)).await.unwrap();
        assert_eq!(result.data.len(), expected, "page {number}");
        assert_eq!(result.meta.total_items, 25);
        assert_eq!(result.meta.total_pages, 3);
        assert_eq!(result.meta.has_previous, number > 1);
        assert_eq!(result.meta.has_next, number < 3);
        seen.extend(result.data.iter().map(|m| m.member_id));
    }
    // Pages never overlap
    assert_eq!(seen.len(), 25);

    let beyond = services.members.search_members(&page(4, 10)).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.total_items, 25);
    assert!(!beyond.meta.has_next);
}

#[tokio::test]
async fn test_largest_page_number_is_an_empty_page() {
    let (_db, services) = setup().await;
    for n in 0..3 {
        create_member(&services, n).await;
    }

    let result = services
        .members
        .search_members(&page(i64::MAX, 10))
        .await
        .unwrap();
    assert!(result.data.is_empty());
    assert_eq!(result.meta.total_items, 3);
    assert_eq!(result.meta.page_number, i64::MAX);
    assert!(!result.meta.has_next);

    let contributions = services
        .contributions
        .search_contributions(&shared::models::ContributionSearch {
            page_number: i64::MAX,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(contributions.data.is_empty());
}

#[tokio::test]
async fn test_empty_result_has_no_pages() {
    let (_db, services) = setup().await;
    let result = services.members.search_members(&page(1, 10)).await.unwrap();
    assert!(result.data.is_empty());
    assert_eq!(result.meta.total_pages, 0);
    assert!(!result.meta.has_previous);
    assert!(!result.meta.has_next);
}

#[tokio::test]
async fn test_deleted_members_are_not_counted() {
    let (_db, services) = setup().await;
    let first = create_member(&services, 1).await;
    create_member(&services, 2).await;
    services
        .members
        .soft_delete_member(first, common::ACTOR)
        .await
        .unwrap();

    let result = services.members.search_members(&page(1, 10)).await.unwrap();
    assert_eq!(result.meta.total_items, 1);
    assert!(result.data.iter().all(|m| m.member_id != first));
}

#[tokio::test]
async fn test_invalid_page_request_rejected() {
    let (_db, services) = setup().await;
    for (number, size) in [(0, 10), (1, 0), (1, 101), (-1, 10)] {
        let err = services
            .members
            .search_members(&page(number, size))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
