//! Built-in nutrition values used when no external database is configured.
//!
//! Lookup is by substring: the first entry, in table order, whose key occurs
//! in the lowercased query wins. Order therefore matters ("chicken" is found
//! before "chicken biryani").

use daybook_sdk::NutritionFacts;

struct DemoFood {
    key: &'static str,
    name: &'static str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    fiber: f64,
}

macro_rules! food {
    ($key:literal, $name:literal, $cal:literal, $p:literal, $c:literal, $f:literal, $fi:literal) => {
        DemoFood {
            key: $key,
            name: $name,
            calories: $cal,
            protein: $p,
            carbs: $c,
            fats: $f,
            fiber: $fi,
        }
    };
}

const DEMO_FOODS: &[DemoFood] = &[
    food!("apple", "apple", 52.0, 0.3, 14.0, 0.2, 2.4),
    food!("banana", "banana", 89.0, 1.1, 22.8, 0.3, 2.6),
    food!("rice", "rice", 130.0, 2.7, 28.0, 0.3, 0.4),
    food!("chicken", "chicken", 239.0, 27.0, 0.0, 14.0, 0.0),
    food!("egg", "egg", 155.0, 13.0, 1.1, 11.0, 0.0),
    food!("milk", "milk", 42.0, 3.4, 5.0, 1.0, 0.0),
    food!("idli", "idli (2 pcs)", 120.0, 3.0, 24.0, 0.5, 1.0),
    food!("dosa", "dosa (plain)", 170.0, 3.0, 29.0, 4.0, 1.0),
    food!("masala dosa", "masala dosa", 380.0, 4.5, 55.0, 15.0, 3.0),
    food!("sambar", "sambar (1 bowl)", 150.0, 4.5, 20.0, 5.0, 4.0),
    food!("vada", "medu vada (2 pcs)", 290.0, 7.5, 24.0, 18.0, 2.0),
    food!("upma", "upma (1 bowl)", 250.0, 3.5, 35.0, 10.0, 3.0),
    food!("pongal", "ven pongal", 320.0, 4.5, 45.0, 12.0, 2.0),
    food!("kesari", "rava kesari", 350.0, 1.5, 55.0, 12.0, 0.5),
    food!("uttapam", "uttapam", 220.0, 3.0, 35.0, 7.0, 2.0),
    food!("pesarattu", "pesarattu", 240.0, 6.0, 32.0, 7.0, 5.0),
    food!("chapati", "chapati (2 pcs)", 240.0, 6.0, 40.0, 6.0, 6.0),
    food!("parotta", "parotta (2 pcs)", 450.0, 6.0, 60.0, 20.0, 2.0),
    food!("curd rice", "curd rice", 290.0, 5.0, 40.0, 10.0, 0.5),
    food!("rasam", "rasam", 60.0, 0.8, 8.0, 3.0, 0.5),
    food!("veg biryani", "veg biryani", 350.0, 6.0, 55.0, 10.0, 6.0),
    food!("chicken biryani", "chicken biryani", 450.0, 19.0, 45.0, 18.0, 3.0),
    food!("chicken 65", "chicken 65 (6 pcs)", 380.0, 21.0, 12.0, 24.0, 1.0),
    food!("fish curry", "fish curry (meen kuzhambu)", 320.0, 18.0, 8.0, 20.0, 2.0),
    food!("chettinad chicken", "chettinad chicken", 410.0, 22.0, 10.0, 28.0, 2.0),
    food!("mutton sukka", "mutton sukka", 390.0, 20.0, 6.0, 28.0, 1.0),
    food!("pepper chicken", "pepper chicken", 340.0, 21.0, 8.0, 18.0, 1.0),
    food!("egg curry", "egg curry (2 eggs)", 280.0, 10.5, 8.0, 20.0, 1.0),
    food!("prawn fry", "prawn fry", 310.0, 16.5, 12.0, 18.0, 1.0),
    food!("omelette", "omelette (2 eggs)", 210.0, 10.5, 2.0, 16.0, 0.0),
    food!("karuvadu", "karuvadu (dry fish)", 280.0, 26.0, 0.0, 14.0, 0.0),
    food!("jackfruit", "jackfruit (1 cup)", 155.0, 2.8, 38.0, 1.0, 2.5),
    food!("mango", "mango (1 medium)", 200.0, 2.8, 50.0, 1.3, 5.0),
    food!("guava", "guava (1 medium)", 68.0, 2.6, 14.0, 0.9, 5.4),
    food!("papaya", "papaya (1 cup)", 60.0, 0.5, 15.0, 0.2, 2.5),
    food!("pomegranate", "pomegranate (1 cup)", 145.0, 2.9, 33.0, 2.0, 7.0),
    food!("sapota", "sapota (1 medium)", 83.0, 0.4, 20.0, 1.1, 5.3),
    food!("tender coconut", "tender coconut water", 45.0, 0.7, 9.0, 0.5, 2.6),
    food!("murukku", "murukku (2 pcs)", 150.0, 2.0, 18.0, 8.0, 1.0),
    food!("athirasam", "athirasam (1 pc)", 180.0, 1.0, 28.0, 7.0, 0.5),
    food!("paniyaram", "paniyaram (3 pcs)", 120.0, 3.0, 20.0, 3.0, 1.0),
    food!("sundal", "chana sundal (1 cup)", 220.0, 12.0, 35.0, 4.0, 10.0),
    food!("bajji", "vazhakkai bajji (2 pcs)", 280.0, 6.0, 35.0, 15.0, 3.0),
    food!("bonda", "aloo bonda (2 pcs)", 300.0, 6.0, 40.0, 14.0, 3.0),
    food!("medu vada", "medu vada (2 pcs)", 290.0, 10.0, 24.0, 18.0, 2.0),
    food!("masala vada", "masala vada (2 pcs)", 320.0, 12.0, 30.0, 18.0, 6.0),
    food!("mixture", "mixture (1 cup)", 450.0, 12.0, 45.0, 25.0, 4.0),
    food!("thattai", "thattai (2 pcs)", 160.0, 2.0, 20.0, 8.0, 1.0),
    food!("seedai", "seedai (1 cup)", 350.0, 4.0, 45.0, 18.0, 2.0),
    food!("pani puri", "pani puri (6 pcs)", 180.0, 3.0, 36.0, 4.0, 2.0),
    food!("masal puri", "masal puri (1 plate)", 250.0, 4.5, 40.0, 10.0, 4.0),
    food!("bhel puri", "bhel puri (1 plate)", 280.0, 5.0, 45.0, 9.0, 3.0),
    food!("sev puri", "sev puri (1 plate)", 320.0, 4.5, 42.0, 16.0, 2.0),
    food!("dahi puri", "dahi puri (6 pcs)", 350.0, 6.0, 48.0, 14.0, 2.0),
    food!("samosa", "samosa (1 pc)", 260.0, 4.5, 24.0, 17.0, 2.0),
    food!("pav bhaji", "pav bhaji (2 pav)", 400.0, 7.5, 55.0, 15.0, 5.0),
    food!("cutlet", "veg cutlet (2 pcs)", 300.0, 4.5, 30.0, 18.0, 3.0),
    food!("lemon rice", "lemon rice", 320.0, 4.5, 50.0, 12.0, 2.0),
    food!("tamarind rice", "tamarind rice", 350.0, 5.0, 55.0, 14.0, 3.0),
    food!("tomato rice", "tomato rice", 290.0, 3.5, 48.0, 10.0, 2.0),
];

/// First demo entry whose key occurs in `query` (case-insensitive).
#[must_use]
pub fn demo_lookup(query: &str) -> Option<(&'static str, NutritionFacts)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    DEMO_FOODS
        .iter()
        .find(|food| needle.contains(food.key))
        .map(|food| {
            (
                food.name,
                NutritionFacts {
                    calories: food.calories,
                    protein: food.protein,
                    carbs: food.carbs,
                    fats: food.fats,
                    fiber: food.fiber,
                },
            )
        })
}
