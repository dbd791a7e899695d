use serde_json::json;

use crate::store::memory::MemoryStore;
use crate::store::Collection;

/// Fill an in-memory store with a small, self-consistent blog: categories,
/// authors, posts referencing both, an about page and a few recipe ideas.
pub fn seed_demo_data(store: &MemoryStore) {
    tracing::info!("Starting demo data seeding...");

    let street_food = store.seed(
        Collection::Categories,
        json!({
            "title": "Street Food",
            "slug": "street-food",
            "metadata": { "name": "Street Food", "description": "Stalls, carts and night markets." }
        }),
    );
    let trattorias = store.seed(
        Collection::Categories,
        json!({
            "title": "Restaurants",
            "slug": "restaurants",
            "metadata": { "name": "Restaurants", "description": "Sit-down meals worth the trip." }
        }),
    );

    let mia = store.seed(
        Collection::Authors,
        json!({
            "title": "Mia Castro",
            "slug": "mia-castro",
            "metadata": { "name": "Mia Castro", "bio": "Chases noodles across Asia.", "instagram": "miaeats" }
        }),
    );
    let luca = store.seed(
        Collection::Authors,
        json!({
            "title": "Luca Bianchi",
            "slug": "luca-bianchi",
            "metadata": { "name": "Luca Bianchi", "bio": "Grew up above a trattoria." }
        }),
    );

    // Using include_str! to embed demo content directly into the binary
    let demo_posts = [
        (
            "bangkok-street-food",
            "Bangkok Street Food",
            "Bangkok",
            "A night crawl through Yaowarat's food stalls.",
            include_str!("../demo_data/bangkok_street_food.md"),
            &street_food,
            &mia,
        ),
        (
            "roman-trattorias",
            "Roman Trattorias",
            "Rome",
            "The four classic pastas and where to eat them.",
            include_str!("../demo_data/roman_trattorias.md"),
            &trattorias,
            &luca,
        ),
        (
            "oaxaca-markets",
            "Oaxaca Market Grills",
            "Oaxaca, Mexico",
            "Choosing meat by weight in the pasillo de humo.",
            include_str!("../demo_data/oaxaca_markets.md"),
            &street_food,
            &mia,
        ),
    ];

    for (slug, title, location, excerpt, content, category, author) in demo_posts {
        store.seed(
            Collection::Posts,
            json!({
                "title": title,
                "slug": slug,
                "metadata": {
                    "title": title,
                    "excerpt": excerpt,
                    "content": content,
                    "location": location,
                    "category": category,
                    "author": author
                }
            }),
        );
        tracing::info!("Seeded post '{}'.", slug);
    }

    store.seed(
        Collection::Pages,
        json!({
            "title": "About",
            "slug": "about",
            "metadata": {
                "title": "About World Travels Food Blog",
                "subtitle": "Exploring the world one bite at a time",
                "content": include_str!("../demo_data/about.md")
            }
        }),
    );

    for (title, prompt, votes) in [
        ("Khao soi at home", "Northern Thai curry noodles with crispy topping.", 5),
        ("Perfect carbonara", "No cream, just eggs, pecorino and guanciale.", 3),
        ("Tlayudas", "Oaxacan giant tortillas with asiento and beans.", 0),
    ] {
        store.seed(
            Collection::Prompts,
            json!({ "title": title, "metadata": { "prompt": prompt, "votes": votes } }),
        );
    }

    tracing::info!("Demo data seeding completed.");
}
