use futures::TryStreamExt as _;
use moviedb_dal::genre::{Genre, GenreRepositoryImpl};
use sqlx::{
    Executor,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing_test::traced_test;

const TEST_DATA: &str = r#"
INSERT INTO genre(idgenre, name) VALUES (1, 'Drama');
INSERT INTO genre(idgenre, name) VALUES (2, 'Comedy');
INSERT INTO genre(idgenre, name) VALUES (3, 'Thriller');
"#;

async fn memory_pool() -> moviedb_dal::Pool {
    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .unwrap()
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await
        .unwrap()
}

async fn init_db(with_data: bool) -> moviedb_dal::Pool {
    let pool = memory_pool().await;
    moviedb_dal::init_schema(&pool).await.unwrap();

    if with_data {
        pool.execute_many(TEST_DATA)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
    }

    pool
}

#[tokio::test]
async fn test_list_genres() {
    let repo = GenreRepositoryImpl::new(init_db(true).await);

    let mut genres = repo.list_genres().await.unwrap();
    genres.sort_by_key(|g| g.id);
    assert_eq!(
        vec![
            Genre::new(1, "Drama"),
            Genre::new(2, "Comedy"),
            Genre::new(3, "Thriller")
        ],
        genres
    );
}

#[tokio::test]
async fn test_list_genres_empty() {
    let repo = GenreRepositoryImpl::new(init_db(false).await);
    let genres = repo.list_genres().await.unwrap();
    assert!(genres.is_empty());
}

#[tokio::test]
async fn test_get_genre() {
    let repo = GenreRepositoryImpl::new(init_db(true).await);

    let genre = repo.get_genre("Comedy").await.unwrap();
    assert_eq!(Some(Genre::new(2, "Comedy")), genre);

    let missing = repo.get_genre("Western").await.unwrap();
    assert!(missing.is_none());

    // exact match only
    let missing = repo.get_genre("comedy").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_add_genre() {
    let repo = GenreRepositoryImpl::new(init_db(false).await);

    repo.add_genre("Drama").await.unwrap();

    let genre = repo.get_genre("Drama").await.unwrap().unwrap();
    assert!(genre.id > 0);
    assert_eq!("Drama", genre.name);
    assert_eq!(vec![genre], repo.list_genres().await.unwrap());
}

#[tokio::test]
async fn test_add_genre_generates_next_id() {
    let repo = GenreRepositoryImpl::new(init_db(true).await);

    repo.add_genre("Western").await.unwrap();

    let genre = repo.get_genre("Western").await.unwrap().unwrap();
    assert_eq!(4, genre.id);
    assert_eq!(4, repo.list_genres().await.unwrap().len());
}

#[tokio::test]
async fn test_add_duplicate_genre() {
    let repo = GenreRepositoryImpl::new(init_db(true).await);

    let err = repo.add_genre("Drama").await.unwrap_err();
    assert!(err.is_unique_violation());
    assert_eq!(Some("adding genre: Drama"), err.context());
    assert_eq!(3, repo.list_genres().await.unwrap().len());
}

#[tokio::test]
async fn test_failure_without_schema() {
    let pool = moviedb_dal::new_pool_with_size("sqlite::memory:", 1)
        .await
        .unwrap();
    let repo = GenreRepositoryImpl::new(pool);

    let err = repo.list_genres().await.unwrap_err();
    assert_eq!(Some("listing genres"), err.context());

    let err = repo.get_genre("Drama").await.unwrap_err();
    assert!(err.to_string().contains("getting genre by name: Drama"));
}

#[tokio::test]
#[traced_test]
async fn test_genre_operations_are_logged() {
    let repo = GenreRepositoryImpl::new(init_db(true).await);

    repo.get_genre("Drama").await.unwrap();
    assert!(logs_contain("Getting genre Drama"));

    repo.add_genre("Drama").await.unwrap_err();
    assert!(logs_contain("Database error while adding genre: Drama"));
}
