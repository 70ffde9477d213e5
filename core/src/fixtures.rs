//! Seed rows loaded by `RecordStore::seeded`.

use crate::types::{Address, Company, Geo, Post, Todo, User};

pub(crate) fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Leanne Graham".to_string(),
            email: "Sincere@april.biz".to_string(),
            username: "Bret".to_string(),
            phone: "1-770-736-8031 x56442".to_string(),
            website: "hildegard.org".to_string(),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
                geo: Geo {
                    lat: "-37.3159".to_string(),
                    lng: "81.1496".to_string(),
                },
            },
            company: Company {
                name: "Romaguera-Crona".to_string(),
                catch_phrase: "Multi-layered client-server neural-net".to_string(),
                bs: "harness real-time e-markets".to_string(),
            },
        },
        User {
            id: 2,
            name: "Ervin Howell".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            username: "Antonette".to_string(),
            phone: "010-692-6593 x09125".to_string(),
            website: "anastasia.net".to_string(),
            address: Address {
                street: "Victor Plains".to_string(),
                suite: "Suite 879".to_string(),
                city: "Wisokyburgh".to_string(),
                zipcode: "90566-7771".to_string(),
                geo: Geo {
                    lat: "-43.9509".to_string(),
                    lng: "-34.4618".to_string(),
                },
            },
            company: Company {
                name: "Deckow-Crist".to_string(),
                catch_phrase: "Proactive didactic contingency".to_string(),
                bs: "synergize scalable supply-chains".to_string(),
            },
        },
    ]
}

pub(crate) fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            user_id: 1,
            title: "Sample Post 1".to_string(),
            body: "This is a sample post content".to_string(),
        },
        Post {
            id: 2,
            user_id: 2,
            title: "Sample Post 2".to_string(),
            body: "Another sample post content".to_string(),
        },
    ]
}

pub(crate) fn todos() -> Vec<Todo> {
    vec![
        Todo {
            id: 1,
            user_id: 1,
            title: "Sample Todo 1".to_string(),
            completed: false,
        },
        Todo {
            id: 2,
            user_id: 2,
            title: "Sample Todo 2".to_string(),
            completed: true,
        },
    ]
}
