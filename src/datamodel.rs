pub struct Author {
    pub id: i32,
    pub name: &'static str,
}

pub struct Book {
    pub id: i32,
    pub name: &'static str,
    pub author_id: i32,
}

pub static ALL_AUTHORS: &[Author] = &[
    Author {
        id: 1,
        name: "J. K. Rowling",
    },
    Author {
        id: 2,
        name: "J. R. R. Tolkien",
    },
    Author {
        id: 3,
        name: "Brent Weeks",
    },
];

pub static ALL_BOOKS: &[Book] = &[
    Book {
        id: 1,
        name: "Harry Potter and the Chamber of Secrets",
        author_id: 1,
    },
    Book {
        id: 2,
        name: "Harry Potter and the Prisoner of Azkaban",
        author_id: 1,
    },
    Book {
        id: 3,
        name: "Harry Potter and the Goblet of Fire",
        author_id: 1,
    },
    Book {
        id: 4,
        name: "The Fellowship of the Ring",
        author_id: 2,
    },
    Book {
        id: 5,
        name: "The Two Towers",
        author_id: 2,
    },
    Book {
        id: 6,
        name: "The Return of the King",
        author_id: 2,
    },
    Book {
        id: 7,
        name: "The Way of Shadows",
        author_id: 3,
    },
    Book {
        id: 8,
        name: "Beyond the Shadows",
        author_id: 3,
    },
];
