//! Sample catalog seeding for fresh deployments.
//!
//! When the books collection is empty, inserts a starter catalog and a few
//! reviews so the application has something to show before the first user
//! contributes. Ids and timestamps are assigned by the store as usual.

use tracing::info;

use models::{NewBook, NewReview};

use crate::errors::ServiceError;
use crate::store::RecordStore;

/// Anonymous reviewer id used by seeded reviews.
const ANONYMOUS_USER: u32 = 0;

/// Populate an empty catalog with sample data. A non-empty catalog is left
/// untouched.
pub async fn initialize(store: &dyn RecordStore) -> Result<(), ServiceError> {
    if !store.list_books().await.is_empty() {
        return Ok(());
    }

    info!("books collection is empty, seeding sample catalog");
    for book in sample_books() {
        store.create_book(book).await?;
    }
    for review in sample_reviews() {
        store.create_review(review).await?;
    }
    Ok(())
}

fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook {
            title: "Clean Code: A Handbook of Agile Software Craftsmanship".into(),
            author: "Robert C. Martin".into(),
            isbn: Some("978-0132350884".into()),
            description: Some(
                "Even bad code can function. But if code isn't clean, it can bring a \
                 development organization to its knees."
                    .into(),
            ),
            publication_year: Some(2008),
            added_by: None,
        },
        NewBook {
            title: "Design Patterns: Elements of Reusable Object-Oriented Software".into(),
            author: "Erich Gamma, Richard Helm, Ralph Johnson, John Vlissides".into(),
            isbn: Some("978-0201633610".into()),
            description: Some(
                "A catalog of simple and succinct solutions to commonly occurring design \
                 problems."
                    .into(),
            ),
            publication_year: Some(1994),
            added_by: None,
        },
        NewBook {
            title: "The Pragmatic Programmer: Your Journey to Mastery".into(),
            author: "David Thomas, Andrew Hunt".into(),
            isbn: Some("978-0201616224".into()),
            description: Some(
                "Cuts through the increasing specialization and technicalities of modern \
                 software development to examine the core process."
                    .into(),
            ),
            publication_year: Some(2019),
            added_by: None,
        },
        NewBook {
            title: "Refactoring: Improving the Design of Existing Code".into(),
            author: "Martin Fowler".into(),
            isbn: Some("978-0134757599".into()),
            description: Some(
                "Changing a software system in such a way that it does not alter the external \
                 behavior of the code, yet improves its internal structure."
                    .into(),
            ),
            publication_year: Some(2018),
            added_by: None,
        },
        NewBook {
            title: "You Don't Know JS: Up & Going".into(),
            author: "Kyle Simpson".into(),
            isbn: Some("978-1491924464".into()),
            description: Some(
                "It's easy to learn parts of JavaScript, but much harder to learn it \
                 completely."
                    .into(),
            ),
            publication_year: Some(2015),
            added_by: None,
        },
        NewBook {
            title: "Eloquent JavaScript: A Modern Introduction to Programming".into(),
            author: "Marijn Haverbeke".into(),
            isbn: Some("978-1593279509".into()),
            description: Some(
                "JavaScript lies at the heart of almost every modern web application.".into(),
            ),
            publication_year: Some(2018),
            added_by: None,
        },
    ]
}

fn sample_reviews() -> Vec<NewReview> {
    vec![
        NewReview {
            book_id: 1,
            user_id: ANONYMOUS_USER,
            rating: 5,
            title: Some("Essential reading for developers".into()),
            content: "This book changed how I approach code reviews and my own programming \
                      habits. The principles are timeless despite being published over a \
                      decade ago."
                .into(),
        },
        NewReview {
            book_id: 1,
            user_id: ANONYMOUS_USER,
            rating: 4,
            title: Some("Good but some examples are dated".into()),
            content: "Great principles that still apply today, but some code examples feel \
                      outdated. Would love to see an updated version with modern languages \
                      and practices."
                .into(),
        },
        NewReview {
            book_id: 2,
            user_id: ANONYMOUS_USER,
            rating: 4,
            title: Some("Classic but complex for beginners".into()),
            content: "While this is undoubtedly a foundational text in software engineering, \
                      I found some sections quite dense and theoretical."
                .into(),
        },
    ]
}
