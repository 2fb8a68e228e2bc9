use ratings_store::StoreError;
use ratings_store::domain::category::NewCategory;
use ratings_store::domain::rating::{NewRating, Rating, RatingScore};
use ratings_store::domain::score::NewScore;
use ratings_store::domain::types::{ItemId, ItemName, ScoreValue};
use ratings_store::forms::categories::{CategoryForm, CategoryFormPatch, MetricPatch};
use ratings_store::forms::ratings::{RatingForm, ScoreForm};
use ratings_store::repository::{
    CategoryReader, ItemReader, RatingListQuery, RatingReader, ScoreListQuery, ScoreReader,
};
use ratings_store::{RatingStore, StoreResult};

mod common;

/// Durable rows and cached entities must describe the same data.
fn assert_write_through(store: &RatingStore) -> StoreResult<()> {
    let repo = store.repository();

    let mut categories = repo.list_categories()?;
    categories.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
    let cached: Vec<_> = store.categories().into_iter().cloned().collect();
    assert_eq!(categories, cached);

    let mut items = repo.list_items()?;
    items.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
    let cached: Vec<_> = store.items().into_iter().cloned().collect();
    assert_eq!(items, cached);

    let mut ratings = repo.list_ratings(RatingListQuery::default())?;
    ratings.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
    let cached: Vec<_> = store.ratings().into_iter().cloned().collect();
    assert_eq!(ratings, cached);

    let mut scores = repo.list_scores(ScoreListQuery::default())?;
    scores.sort_by(|a, b| a.id.cmp(&b.id));
    let cached: Vec<_> = store.scores().into_iter().cloned().collect();
    assert_eq!(scores, cached);
    Ok(())
}

fn books_form() -> CategoryForm {
    let form = CategoryForm::new()
        .update(CategoryFormPatch {
            category_name: Some("Books".to_string()),
            category_description: Some("Things I read".to_string()),
        })
        .add_metric();
    let plot = form.rating_schema[0].rating_schema_id.clone();
    form.update_metric(
        &plot,
        MetricPatch {
            rating_schema_name: Some("Plot".to_string()),
            ..MetricPatch::default()
        },
    )
}

#[test]
fn entities_survive_close_and_reopen() {
    let test_db = common::TestDb::new();
    let mut store = test_db.open();

    let new_category = NewCategory::try_from(books_form()).expect("form should convert");
    let books = store.create_category(new_category).unwrap();
    assert_eq!(books.rating_schema[0].weight.get(), 5);

    let dune = store.create_item(common::new_item("Dune")).unwrap();
    let rating_form = RatingForm {
        item_id: dune.id.to_string(),
        category_id: books.id.to_string(),
        scores: vec![ScoreForm {
            rating_schema_id: books.rating_schema[0].id.to_string(),
            score_value: 4,
        }],
    };
    let (rating, scores) = store
        .create_rating(NewRating::try_from(rating_form).unwrap())
        .unwrap();
    assert_write_through(&store).unwrap();

    let before = serde_json::to_string(&(
        store.category(&books.id).unwrap(),
        store.item(&dune.id).unwrap(),
        store.rating(&rating.id).unwrap(),
        store.score(&scores[0].id).unwrap(),
    ))
    .unwrap();
    store.close();

    let store = test_db.open();
    let after = serde_json::to_string(&(
        store.category(&books.id).unwrap(),
        store.item(&dune.id).unwrap(),
        store.rating(&rating.id).unwrap(),
        store.score(&scores[0].id).unwrap(),
    ))
    .unwrap();

    assert_eq!(before, after);
    assert_eq!(store.scores_for_rating(&rating.id).len(), 1);
    assert_eq!(store.aggregate_score(&rating.id).unwrap(), Some(4.0));
    assert_write_through(&store).unwrap();
}

#[test]
fn rejected_writes_leave_store_and_cache_in_step() {
    let test_db = common::TestDb::new();
    let mut store = test_db.open();

    let books = store
        .create_category(common::new_category(
            "Books",
            vec![common::metric("Plot", 5), common::metric("Prose", 2)],
        ))
        .unwrap();
    let dune = store.create_item(common::new_item("Dune")).unwrap();
    let (rating, _) = store
        .create_rating(NewRating {
            id: None,
            item_id: dune.id.clone(),
            category_id: books.id.clone(),
            scores: vec![],
        })
        .unwrap();
    store
        .create_score(NewScore {
            id: None,
            rating_id: rating.id.clone(),
            rating_schema_id: books.rating_schema[0].id.clone(),
            value: ScoreValue::new(4).unwrap(),
        })
        .unwrap();

    let duplicate = store.create_score(NewScore {
        id: None,
        rating_id: rating.id.clone(),
        rating_schema_id: books.rating_schema[0].id.clone(),
        value: ScoreValue::new(1).unwrap(),
    });
    assert!(matches!(duplicate, Err(StoreError::ConstraintViolation(_))));

    let dangling = store.create_rating(NewRating {
        id: None,
        item_id: ItemId::generate(),
        category_id: books.id.clone(),
        scores: vec![],
    });
    assert!(matches!(dangling, Err(StoreError::ConstraintViolation(_))));

    assert!(matches!(
        store.remove_category(&books.id),
        Err(StoreError::ConstraintViolation(_))
    ));
    assert!(matches!(
        store.remove_item(&dune.id),
        Err(StoreError::ConstraintViolation(_))
    ));
    assert_write_through(&store).unwrap();

    let mut edited = books.clone();
    edited.rating_schema.remove(1);
    edited.rating_schema[0].weight = ratings_store::domain::types::RatingSchemaWeight::new(3)
        .unwrap();
    store.update_category(edited.clone()).unwrap();
    assert_eq!(
        store.repository().get_category_by_id(&books.id).unwrap(),
        Some(edited)
    );

    store.remove_rating(&rating.id).unwrap();
    store.remove_item(&dune.id).unwrap();
    store.remove_category(&books.id).unwrap();
    assert!(store.categories().is_empty());
    assert!(store.repository().get_item_by_id(&dune.id).unwrap().is_none());
    assert_write_through(&store).unwrap();
}

#[test]
fn updates_and_score_removal_write_through() {
    let test_db = common::TestDb::new();
    let mut store = test_db.open();

    let books = store
        .create_category(common::new_category(
            "Books",
            vec![common::metric("Plot", 5)],
        ))
        .unwrap();
    let films = store
        .create_category(common::new_category(
            "Films",
            vec![common::metric("Acting", 4)],
        ))
        .unwrap();
    let dune = store.create_item(common::new_item("Dune")).unwrap();
    let (rating, scores) = store
        .create_rating(NewRating {
            id: None,
            item_id: dune.id.clone(),
            category_id: books.id.clone(),
            scores: vec![RatingScore {
                id: None,
                rating_schema_id: books.rating_schema[0].id.clone(),
                value: ScoreValue::new(4).unwrap(),
            }],
        })
        .unwrap();

    let mut renamed = dune.clone();
    renamed.name = ItemName::new("Dune Messiah").unwrap();
    renamed.description = "second book".to_string();
    store.update_item(renamed.clone()).unwrap();
    assert_eq!(store.item(&dune.id).unwrap(), &renamed);
    assert_write_through(&store).unwrap();

    let mut rescored = scores[0].clone();
    rescored.value = ScoreValue::new(9).unwrap();
    store.update_score(rescored.clone()).unwrap();
    assert_eq!(
        store.repository().get_score_by_id(&rescored.id).unwrap(),
        Some(rescored.clone())
    );
    assert_write_through(&store).unwrap();

    let moved = Rating {
        category_id: films.id.clone(),
        ..rating.clone()
    };
    assert!(matches!(
        store.update_rating(moved.clone()),
        Err(StoreError::ConstraintViolation(_))
    ));
    assert_eq!(store.rating(&rating.id).unwrap(), &rating);
    assert_write_through(&store).unwrap();

    store.remove_score(&rescored.id).unwrap();
    assert!(store.score(&rescored.id).is_err());
    assert!(store
        .repository()
        .get_score_by_id(&rescored.id)
        .unwrap()
        .is_none());
    assert_write_through(&store).unwrap();

    store.update_rating(moved.clone()).unwrap();
    assert_eq!(
        store.repository().get_rating_by_id(&rating.id).unwrap(),
        Some(moved)
    );
    assert_write_through(&store).unwrap();

    assert!(matches!(
        store.remove_score(&rescored.id),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn invalid_drafts_never_reach_the_store() {
    let test_db = common::TestDb::new();
    let mut store = test_db.open();

    let blank_metric = CategoryForm::new()
        .update(CategoryFormPatch {
            category_name: Some("Books".to_string()),
            category_description: None,
        })
        .add_metric();
    let err = NewCategory::try_from(blank_metric)
        .map_err(StoreError::from)
        .unwrap_err();
    assert!(matches!(err, StoreError::ValidationError(_)));

    let plot = common::metric("Plot", 5);
    let err = store
        .create_category(common::new_category("Books", vec![plot.clone(), plot]))
        .unwrap_err();
    assert!(matches!(err, StoreError::ValidationError(_)));
    assert!(store.repository().list_categories().unwrap().is_empty());
}

#[test]
fn open_reports_migration_failure() {
    let test_db = common::TestDb::new();
    {
        use diesel::connection::SimpleConnection;
        let pool = test_db.pool();
        let mut conn = pool.get().unwrap();
        conn.batch_execute("CREATE TABLE score (scoreId TEXT PRIMARY KEY NOT NULL);")
            .unwrap();
    }

    let result = RatingStore::open(&test_db.config());
    assert!(matches!(result, Err(StoreError::MigrationFailure(_))));
}
