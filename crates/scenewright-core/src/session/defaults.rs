//! The seeded example session.
//!
//! Ships as placeholder content for the setup form and as a fixture for
//! tests. The attribute set seeds the three standard sliders at their
//! midpoints.

use scenewright_types::character::{AttributeSlider, Character};
use scenewright_types::scene::Scene;
use scenewright_types::session::{CharacterPair, SceneSession};

/// The complete seeded session: two characters with the standard
/// attribute sliders at 50, and a scene with an initial plot line.
pub fn default_session() -> SceneSession {
    let mut character1 = Character::new(
        "Harry Potter",
        "A young wizard struggling with the weight of his destiny. Currently feeling \
         conflicted about his latest encounter with dark magic.",
    );
    character1.attributes.insert(
        "EmotionalState".to_string(),
        AttributeSlider::new(50, "Troubled", "Confident"),
    );
    character1.attributes.insert(
        "DialogueStyle".to_string(),
        AttributeSlider::new(50, "Hesitant", "Assertive"),
    );
    character1.attributes.insert(
        "Relationships".to_string(),
        AttributeSlider::new(50, "Distant", "Connected"),
    );

    let mut character2 = Character::new(
        "Severus Snape",
        "A complex character hiding his true motivations. Maintaining his stern exterior \
         while internally conflicted about his role.",
    );
    character2.attributes.insert(
        "EmotionalState".to_string(),
        AttributeSlider::new(50, "Guarded", "Expressive"),
    );
    character2.attributes.insert(
        "DialogueStyle".to_string(),
        AttributeSlider::new(50, "Cryptic", "Direct"),
    );
    character2.attributes.insert(
        "Relationships".to_string(),
        AttributeSlider::new(50, "Antagonistic", "Protective"),
    );

    SceneSession {
        characters: CharacterPair {
            character1,
            character2,
        },
        scene: Scene::new(
            "In the dimly lit potions classroom after hours. Tension hangs in the air as \
             recent events at Hogwarts have put everyone on edge.",
            "Harry needs to confront Snape about information regarding Voldemort, but must \
             navigate the complex dynamics of their relationship.",
        ),
    }
}
