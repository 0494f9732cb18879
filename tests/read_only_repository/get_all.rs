use super::*;

/// Tests reading every row of an empty table.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_for_empty_table() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReadOnlyRepository::new(db);
    let customers = repo.get_all::<Customer>(None, None, None).await?;

    assert!(customers.is_empty());

    Ok(())
}

/// Tests reading every row ordered by name.
///
/// Verifies that rows inserted out of order come back sorted by the given column.
///
/// Expected: Ok with customers sorted by name ascending
#[tokio::test]
async fn returns_all_rows_in_requested_order() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customers(db, &["Carol", "Alice", "Bob"]).await?;

    let repo = ReadOnlyRepository::new(db);
    let customers = repo
        .get_all(Some(OrderBy::<Customer>::asc(customer::Column::Name)), None, None)
        .await?;

    let names: Vec<_> = customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    Ok(())
}

/// Tests paging through ordered rows with skip and take.
///
/// Expected: Ok with the second page of two rows
#[tokio::test]
async fn pages_with_skip_and_take() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customers(db, &["A", "B", "C", "D", "E"]).await?;

    let repo = ReadOnlyRepository::new(db);
    let page = repo
        .get_all(
            Some(OrderBy::<Customer>::asc(customer::Column::Name)),
            Some(2),
            Some(2),
        )
        .await?;

    let names: Vec<_> = page.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["C", "D"]);

    Ok(())
}

/// Tests skipping rows without a take.
///
/// Expected: Ok with every row after the skipped ones
#[tokio::test]
async fn skips_without_take() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customers(db, &["A", "B", "C"]).await?;

    let repo = ReadOnlyRepository::new(db);
    let rest = repo
        .get_all(
            Some(OrderBy::<Customer>::desc(customer::Column::Name)),
            Some(1),
            None,
        )
        .await?;

    let names: Vec<_> = rest.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);

    Ok(())
}

/// Tests skipping past the end of the table.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_when_skip_exceeds_rows() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customers(db, &["A", "B"]).await?;

    let repo = ReadOnlyRepository::new(db);
    let page = repo
        .get_all(
            Some(OrderBy::<Customer>::asc(customer::Column::Name)),
            Some(5),
            Some(10),
        )
        .await?;

    assert!(page.is_empty());

    Ok(())
}
