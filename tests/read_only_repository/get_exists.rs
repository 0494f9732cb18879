use super::*;

/// Tests existence of a matching row.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_row_matches() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::customer::CustomerFactory::new(db)
        .name("Ada")
        .build()
        .await?;

    let repo = ReadOnlyRepository::new(db);
    let exists = repo
        .get_exists::<Customer>(Some(Condition::all().add(customer::Column::Name.eq("Ada"))))
        .await?;

    assert!(exists);

    Ok(())
}

/// Tests existence when no row matches.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_nothing_matches() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Customer).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_customer(db).await?;

    let repo = ReadOnlyRepository::new(db);
    let exists = repo
        .get_exists::<Customer>(Some(Condition::all().add(customer::Column::Name.eq("Ada"))))
        .await?;

    assert!(!exists);

    Ok(())
}

/// Tests existence without a filter.
///
/// Expected: Ok(false) on an empty table, Ok(true) once a row exists
#[tokio::test]
async fn checks_any_row_without_filter() -> Result<(), RepoError> {
    let test = TestBuilder::new().with_table(Product).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReadOnlyRepository::new(db);
    assert!(!repo.get_exists::<Product>(None).await?);

    factory::create_product(db).await?;
    assert!(repo.get_exists::<Product>(None).await?);

    Ok(())
}
