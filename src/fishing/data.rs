//! Static tackle, fish, stage and difficulty tables.

use super::types::{
    BoatType, Difficulty, FishType, LevelMilestone, Lure, Rod, Stage, StageFeatures, TimeOfDay,
    TimePreference,
};

pub const RODS: &[Rod] = &[
    Rod {
        name: "Basic Rod",
        cast_distance: 180.0,
        reel_speed: 1.2,
        color: "#8B4513",
        durability: 100,
    },
    Rod {
        name: "Carbon Rod",
        cast_distance: 240.0,
        reel_speed: 1.6,
        color: "#404040",
        durability: 150,
    },
    Rod {
        name: "Pro Rod",
        cast_distance: 300.0,
        reel_speed: 2.0,
        color: "#FFD700",
        durability: 200,
    },
];

pub const LURES: &[Lure] = &[
    Lure {
        name: "Bobber",
        attraction: 1.0,
        wobble: 0.5,
        price: 0,
        unlock_level: 0,
        color: "#FF6B6B",
        stage_bonus: &[0],
    },
    Lure {
        name: "Spoon",
        attraction: 1.6,
        wobble: 2.0,
        price: 500,
        unlock_level: 5,
        color: "#C0C0C0",
        stage_bonus: &[2, 3],
    },
    Lure {
        name: "Worm",
        attraction: 2.2,
        wobble: 1.2,
        price: 1000,
        unlock_level: 10,
        color: "#8B4513",
        stage_bonus: &[0, 1],
    },
];

pub const FISH_TYPES: &[FishType] = &[
    FishType {
        name: "Minnow",
        size: 30,
        rarity: 0,
        points: 10,
        color: "#8B5A2B",
        time: TimePreference::Any,
    },
    FishType {
        name: "Perch",
        size: 50,
        rarity: 1,
        points: 25,
        color: "#4CAF50",
        time: TimePreference::Day,
    },
    FishType {
        name: "Bass",
        size: 70,
        rarity: 1,
        points: 40,
        color: "#FF5722",
        time: TimePreference::Any,
    },
    FishType {
        name: "Catfish",
        size: 90,
        rarity: 2,
        points: 80,
        color: "#795548",
        time: TimePreference::Night,
    },
    FishType {
        name: "Pike",
        size: 110,
        rarity: 2,
        points: 120,
        color: "#2196F3",
        time: TimePreference::Dusk,
    },
    FishType {
        name: "Golden Koi",
        size: 130,
        rarity: 3,
        points: 300,
        color: "#FFD700",
        time: TimePreference::Any,
    },
];

pub const GOLDEN_KOI: usize = 5;

pub const BOAT_TYPES: &[BoatType] = &[
    BoatType {
        name: "Rowboat",
        width: 60,
        height: 40,
        points: 50,
    },
    BoatType {
        name: "Sailboat",
        width: 80,
        height: 60,
        points: 100,
    },
    BoatType {
        name: "Steamship",
        width: 120,
        height: 80,
        points: 200,
    },
    BoatType {
        name: "Battleship",
        width: 160,
        height: 100,
        points: 500,
    },
    BoatType {
        name: "Super Carrier",
        width: 220,
        height: 140,
        points: 1000,
    },
];

pub const STAGES: &[Stage] = &[
    Stage {
        name: "Sunny Lake Pier",
        sky_colors: ["#87CEEB", "#E0F6FF"],
        water_colors: ["#4682B4", "#1E3A5F"],
        time_of_day: TimeOfDay::Day,
        features: StageFeatures {
            lily: true,
            boat: false,
            rain: false,
            lightning: false,
        },
    },
    Stage {
        name: "Twilight River Boat",
        sky_colors: ["#FF6B35", "#2A4D69"],
        water_colors: ["#2A4D69", "#0D1B2A"],
        time_of_day: TimeOfDay::Dusk,
        features: StageFeatures {
            lily: false,
            boat: true,
            rain: false,
            lightning: false,
        },
    },
    Stage {
        name: "Deep Ocean Night",
        sky_colors: ["#0a2b5c", "#001122"],
        water_colors: ["#003366", "#000814"],
        time_of_day: TimeOfDay::Night,
        features: StageFeatures {
            lily: false,
            boat: false,
            rain: false,
            lightning: false,
        },
    },
    Stage {
        name: "Stormy Sea Wreck",
        sky_colors: ["#1a1a2e", "#0a2b5c"],
        water_colors: ["#16213e", "#0f3460"],
        time_of_day: TimeOfDay::Night,
        features: StageFeatures {
            lily: false,
            boat: false,
            rain: true,
            lightning: true,
        },
    },
];

pub const DIFFICULTY_LEVELS: &[Difficulty] = &[
    Difficulty {
        name: "Beginner",
        fish_per_level: 100,
        tension_multiplier: 0.7,
    },
    Difficulty {
        name: "Casual",
        fish_per_level: 150,
        tension_multiplier: 1.0,
    },
    Difficulty {
        name: "Pro",
        fish_per_level: 200,
        tension_multiplier: 1.3,
    },
    Difficulty {
        name: "Master",
        fish_per_level: 250,
        tension_multiplier: 1.6,
    },
];

pub const DEFAULT_DIFFICULTY: usize = 2;

pub const LEVEL_MILESTONES: &[LevelMilestone] = &[
    LevelMilestone {
        level: 10,
        reward: 1000,
        title: "Rising Star",
    },
    LevelMilestone {
        level: 50,
        reward: 5000,
        title: "Pro Angler",
    },
    LevelMilestone {
        level: 100,
        reward: 10000,
        title: "Master Fisher",
    },
    LevelMilestone {
        level: 200,
        reward: 25000,
        title: "Legendary Angler",
    },
];

pub fn rod(index: usize) -> &'static Rod {
    &RODS[index.min(RODS.len() - 1)]
}

pub fn lure(index: usize) -> &'static Lure {
    &LURES[index.min(LURES.len() - 1)]
}

pub fn stage(index: usize) -> &'static Stage {
    &STAGES[index.min(STAGES.len() - 1)]
}

pub fn difficulty(index: usize) -> &'static Difficulty {
    &DIFFICULTY_LEVELS[index.min(DIFFICULTY_LEVELS.len() - 1)]
}

/// Milestone reached exactly at `level`, if any.
pub fn milestone_for_level(level: u32) -> Option<&'static LevelMilestone> {
    LEVEL_MILESTONES.iter().find(|m| m.level == level)
}

pub fn fish_type_by_name(name: &str) -> Option<&'static FishType> {
    FISH_TYPES.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fish_types_ordered_by_points() {
        for pair in FISH_TYPES.windows(2) {
            assert!(pair[0].points < pair[1].points);
        }
        assert_eq!(FISH_TYPES[GOLDEN_KOI].name, "Golden Koi");
    }

    #[test]
    fn test_lookups_clamp_out_of_range() {
        assert_eq!(rod(99).name, "Pro Rod");
        assert_eq!(lure(99).name, "Worm");
        assert_eq!(stage(99).name, "Stormy Sea Wreck");
        assert_eq!(difficulty(99).name, "Master");
    }

    #[test]
    fn test_milestones() {
        assert_eq!(milestone_for_level(10).unwrap().reward, 1000);
        assert_eq!(milestone_for_level(200).unwrap().title, "Legendary Angler");
        assert!(milestone_for_level(11).is_none());
    }

    #[test]
    fn test_difficulty_fish_per_level() {
        let counts: Vec<u32> = DIFFICULTY_LEVELS.iter().map(|d| d.fish_per_level).collect();
        assert_eq!(counts, vec![100, 150, 200, 250]);
        assert_eq!(DIFFICULTY_LEVELS[DEFAULT_DIFFICULTY].name, "Pro");
    }

    #[test]
    fn test_only_storm_stage_has_lightning() {
        let lightning: Vec<_> = STAGES.iter().filter(|s| s.features.lightning).collect();
        assert_eq!(lightning.len(), 1);
        assert_eq!(lightning[0].name, "Stormy Sea Wreck");
    }
}
