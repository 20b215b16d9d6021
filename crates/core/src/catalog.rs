//! Static reference content keyed by dosha: profile text, diet plans, and
//! daily schedules. Pure lookup, no computation.

use serde::{Deserialize, Serialize};

use crate::model::Dosha;

/// Descriptive profile for one dosha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaProfile {
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub recommendations: Vec<String>,
    /// Display color as a hex string, e.g. `#8B4513`.
    pub color: String,
}

/// Recommended foods for one dosha, grouped by meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietPlan {
    pub dosha: Dosha,
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
    pub beverages: Vec<String>,
    pub avoid: Vec<String>,
    pub spices: Vec<String>,
}

/// Recommended daily routine for one dosha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub dosha: Dosha,
    pub wake_up: String,
    pub morning: Vec<String>,
    pub afternoon: Vec<String>,
    pub evening: Vec<String>,
    pub bedtime: String,
    pub exercise: Vec<String>,
    pub meditation: Vec<String>,
}

/// The full content catalog. Lookup by dosha is infallible: every dosha has
/// an entry of each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    profiles: [DoshaProfile; 3],
    diet_plans: [DietPlan; 3],
    schedules: [DailySchedule; 3],
}

impl Catalog {
    #[must_use]
    pub fn profile(&self, dosha: Dosha) -> &DoshaProfile {
        &self.profiles[index_of(dosha)]
    }

    #[must_use]
    pub fn diet_plan(&self, dosha: Dosha) -> &DietPlan {
        &self.diet_plans[index_of(dosha)]
    }

    #[must_use]
    pub fn schedule(&self, dosha: Dosha) -> &DailySchedule {
        &self.schedules[index_of(dosha)]
    }

    /// The reference content set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            profiles: [vata_profile(), pitta_profile(), kapha_profile()],
            diet_plans: [vata_diet(), pitta_diet(), kapha_diet()],
            schedules: [vata_schedule(), pitta_schedule(), kapha_schedule()],
        }
    }
}

fn index_of(dosha: Dosha) -> usize {
    match dosha {
        Dosha::Vata => 0,
        Dosha::Pitta => 1,
        Dosha::Kapha => 2,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn vata_profile() -> DoshaProfile {
    DoshaProfile {
        name: "Vata Dosha".into(),
        description: "Vata is the energy of movement, composed of air and space \
                      elements. People with dominant Vata are creative, energetic, \
                      and flexible."
            .into(),
        characteristics: strings(&[
            "Quick thinking and creative",
            "Enthusiastic and energetic",
            "Flexible and adaptable",
            "Light sleeper",
            "Variable appetite",
            "Dry skin and hair",
        ]),
        recommendations: strings(&[
            "Maintain regular routines",
            "Stay warm and avoid cold weather",
            "Eat warm, cooked foods",
            "Practice calming activities like yoga",
            "Get adequate rest and sleep",
            "Use oil massages for skin",
        ]),
        color: "#8B4513".into(),
    }
}

fn pitta_profile() -> DoshaProfile {
    DoshaProfile {
        name: "Pitta Dosha".into(),
        description: "Pitta is the energy of transformation, composed of fire and \
                      water elements. People with dominant Pitta are intelligent, \
                      ambitious, and focused."
            .into(),
        characteristics: strings(&[
            "Sharp intellect and focused",
            "Natural leaders",
            "Strong digestive fire",
            "Warm body temperature",
            "Medium build and strength",
            "Competitive nature",
        ]),
        recommendations: strings(&[
            "Stay cool and avoid excessive heat",
            "Eat cooling foods and avoid spicy meals",
            "Practice moderation in activities",
            "Engage in calming exercises",
            "Avoid skipping meals",
            "Practice patience and tolerance",
        ]),
        color: "#DC2626".into(),
    }
}

fn kapha_profile() -> DoshaProfile {
    DoshaProfile {
        name: "Kapha Dosha".into(),
        description: "Kapha is the energy of structure, composed of earth and water \
                      elements. People with dominant Kapha are calm, stable, and \
                      nurturing."
            .into(),
        characteristics: strings(&[
            "Calm and peaceful nature",
            "Strong immunity",
            "Steady energy levels",
            "Thick hair and smooth skin",
            "Good long-term memory",
            "Loyal and patient",
        ]),
        recommendations: strings(&[
            "Stay active and exercise regularly",
            "Eat light and warm foods",
            "Avoid excessive sleep",
            "Engage in stimulating activities",
            "Practice deep breathing",
            "Avoid cold and damp environments",
        ]),
        color: "#059669".into(),
    }
}

fn vata_diet() -> DietPlan {
    DietPlan {
        dosha: Dosha::Vata,
        breakfast: strings(&[
            "Warm oatmeal with ghee and nuts",
            "Cooked fruits like stewed apples",
            "Warm milk with cardamom",
            "Whole grain toast with almond butter",
            "Herbal tea (ginger, cinnamon)",
        ]),
        lunch: strings(&[
            "Warm, cooked vegetables with rice",
            "Lentil soup (dal) with ghee",
            "Steamed vegetables with quinoa",
            "Warm salads with olive oil dressing",
            "Cooked grains like barley or wheat",
        ]),
        dinner: strings(&[
            "Light, warm soups",
            "Steamed vegetables with herbs",
            "Small portion of cooked grains",
            "Herbal tea before bed",
            "Avoid raw or cold foods",
        ]),
        snacks: strings(&[
            "Warm nuts (almonds, walnuts)",
            "Dates and figs",
            "Warm herbal teas",
            "Cooked sweet fruits",
            "Warm milk with spices",
        ]),
        beverages: strings(&[
            "Warm water throughout the day",
            "Herbal teas (ginger, licorice)",
            "Warm milk with turmeric",
            "Fresh fruit juices (room temperature)",
            "Avoid cold or iced drinks",
        ]),
        avoid: strings(&[
            "Cold foods and drinks",
            "Raw vegetables in excess",
            "Dry, light foods",
            "Caffeine and alcohol",
            "Processed and frozen foods",
        ]),
        spices: strings(&[
            "Ginger, cumin, coriander",
            "Cardamom, cinnamon, cloves",
            "Turmeric, black pepper",
            "Fennel, asafoetida",
            "Rock salt, mustard seeds",
        ]),
    }
}

fn pitta_diet() -> DietPlan {
    DietPlan {
        dosha: Dosha::Pitta,
        breakfast: strings(&[
            "Cool, sweet fruits like melons",
            "Coconut water and fresh juices",
            "Oatmeal with cooling spices",
            "Fresh fruit smoothies",
            "Herbal teas (mint, rose)",
        ]),
        lunch: strings(&[
            "Fresh salads with cucumber",
            "Steamed vegetables with basmati rice",
            "Cooling soups and broths",
            "Fresh herbs like cilantro and mint",
            "Moderate portions of grains",
        ]),
        dinner: strings(&[
            "Light, cooling meals",
            "Steamed vegetables",
            "Small portions of sweet grains",
            "Cooling herbal teas",
            "Avoid spicy or hot foods",
        ]),
        snacks: strings(&[
            "Fresh, sweet fruits",
            "Coconut water",
            "Cool herbal teas",
            "Fresh vegetable juices",
            "Dates and sweet dried fruits",
        ]),
        beverages: strings(&[
            "Cool (not ice-cold) water",
            "Coconut water",
            "Fresh fruit juices",
            "Herbal teas (mint, fennel)",
            "Avoid alcohol and caffeine",
        ]),
        avoid: strings(&[
            "Spicy, hot, and sour foods",
            "Excessive salt and oil",
            "Alcohol and caffeine",
            "Fermented foods",
            "Red meat and processed foods",
        ]),
        spices: strings(&[
            "Coriander, fennel, cardamom",
            "Mint, dill, turmeric",
            "Cumin (in moderation)",
            "Fresh herbs like cilantro",
            "Avoid hot spices like chili",
        ]),
    }
}

fn kapha_diet() -> DietPlan {
    DietPlan {
        dosha: Dosha::Kapha,
        breakfast: strings(&[
            "Light, warm foods",
            "Spiced herbal teas",
            "Small portions of cooked grains",
            "Warm water with lemon and honey",
            "Light fruits like apples and pears",
        ]),
        lunch: strings(&[
            "Warm, spiced vegetables",
            "Light grains like quinoa",
            "Legumes and lentils",
            "Plenty of warming spices",
            "Moderate portions",
        ]),
        dinner: strings(&[
            "Light, early dinner",
            "Warm soups and broths",
            "Steamed vegetables",
            "Herbal teas with warming spices",
            "Avoid heavy, oily foods",
        ]),
        snacks: strings(&[
            "Warm herbal teas",
            "Light, spiced nuts",
            "Fresh ginger tea",
            "Avoid sweet and heavy snacks",
            "Warm water with spices",
        ]),
        beverages: strings(&[
            "Warm water throughout the day",
            "Spiced herbal teas (ginger, cinnamon)",
            "Warm water with lemon",
            "Avoid cold drinks and dairy",
            "Green tea in moderation",
        ]),
        avoid: strings(&[
            "Heavy, oily, and sweet foods",
            "Dairy products",
            "Cold foods and drinks",
            "Excessive salt",
            "Processed and fried foods",
        ]),
        spices: strings(&[
            "Ginger, black pepper, cayenne",
            "Turmeric, cumin, coriander",
            "Cinnamon, cloves, cardamom",
            "Mustard seeds, fenugreek",
            "All warming spices",
        ]),
    }
}

fn vata_schedule() -> DailySchedule {
    DailySchedule {
        dosha: Dosha::Vata,
        wake_up: "6:00 - 7:00 AM".into(),
        morning: strings(&[
            "Gentle stretching or yoga (15-20 minutes)",
            "Warm oil massage (Abhyanga)",
            "Meditation or breathing exercises (10-15 minutes)",
            "Warm shower",
            "Nutritious breakfast with warm foods",
        ]),
        afternoon: strings(&[
            "Light lunch between 12:00 - 1:00 PM",
            "Short walk after meals",
            "Avoid overexertion",
            "Stay warm and comfortable",
            "Regular work breaks every 2 hours",
        ]),
        evening: strings(&[
            "Light dinner before 7:00 PM",
            "Gentle evening walk",
            "Relaxing activities (reading, music)",
            "Warm bath with essential oils",
            "Early bedtime routine",
        ]),
        bedtime: "9:30 - 10:30 PM".into(),
        exercise: strings(&[
            "Gentle yoga and stretching",
            "Walking and light jogging",
            "Swimming in warm water",
            "Tai Chi or Qigong",
            "Avoid intense or competitive sports",
        ]),
        meditation: strings(&[
            "Morning meditation (10-20 minutes)",
            "Deep breathing exercises",
            "Mindfulness practices",
            "Calming music or mantras",
            "Evening relaxation techniques",
        ]),
    }
}

fn pitta_schedule() -> DailySchedule {
    DailySchedule {
        dosha: Dosha::Pitta,
        wake_up: "5:30 - 6:30 AM".into(),
        morning: strings(&[
            "Cool morning air and gentle sunlight",
            "Moderate yoga practice",
            "Cool shower or bath",
            "Meditation in a cool, quiet place",
            "Nutritious breakfast with cooling foods",
        ]),
        afternoon: strings(&[
            "Lunch between 12:00 - 1:00 PM",
            "Avoid midday sun exposure",
            "Take breaks in cool environments",
            "Stay hydrated with cool water",
            "Avoid intense work during peak heat",
        ]),
        evening: strings(&[
            "Dinner before 7:30 PM",
            "Evening walk in cool air",
            "Relaxing, non-competitive activities",
            "Cool bath or shower",
            "Reading or gentle music",
        ]),
        bedtime: "10:00 - 11:00 PM".into(),
        exercise: strings(&[
            "Swimming and water sports",
            "Moderate yoga practice",
            "Walking or hiking in nature",
            "Cycling in cool weather",
            "Avoid hot yoga or intense workouts",
        ]),
        meditation: strings(&[
            "Morning meditation (15-20 minutes)",
            "Cooling breath practices (Sheetali)",
            "Visualization of cool, peaceful scenes",
            "Moonlight meditation",
            "Avoid meditation in hot environments",
        ]),
    }
}

fn kapha_schedule() -> DailySchedule {
    DailySchedule {
        dosha: Dosha::Kapha,
        wake_up: "5:00 - 6:00 AM".into(),
        morning: strings(&[
            "Vigorous exercise or yoga",
            "Dry brushing before shower",
            "Energizing breathing exercises",
            "Hot shower with invigorating oils",
            "Light breakfast with warming spices",
        ]),
        afternoon: strings(&[
            "Light lunch between 11:00 AM - 12:00 PM",
            "Active work and movement",
            "Avoid afternoon naps",
            "Stay active and engaged",
            "Take stairs instead of elevators",
        ]),
        evening: strings(&[
            "Early, light dinner before 6:00 PM",
            "Vigorous evening exercise",
            "Stimulating activities",
            "Hot bath with energizing oils",
            "Avoid heavy evening meals",
        ]),
        bedtime: "10:00 - 11:00 PM".into(),
        exercise: strings(&[
            "Vigorous cardio exercises",
            "Hot yoga or Bikram yoga",
            "Running and jogging",
            "Weight training",
            "High-intensity interval training",
        ]),
        meditation: strings(&[
            "Energizing morning meditation",
            "Breath of fire (Kapalabhati)",
            "Active meditation practices",
            "Chanting and mantras",
            "Avoid meditation that increases lethargy",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dosha_has_catalog_entries() {
        let catalog = Catalog::builtin();
        for dosha in Dosha::ALL {
            assert!(!catalog.profile(dosha).description.is_empty());
            assert_eq!(catalog.diet_plan(dosha).dosha, dosha);
            assert_eq!(catalog.schedule(dosha).dosha, dosha);
        }
    }

    #[test]
    fn profile_lists_are_populated() {
        let catalog = Catalog::builtin();
        for dosha in Dosha::ALL {
            let profile = catalog.profile(dosha);
            assert_eq!(profile.characteristics.len(), 6);
            assert_eq!(profile.recommendations.len(), 6);
            assert!(profile.color.starts_with('#'));
        }
    }
}
