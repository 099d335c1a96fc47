//! Static achievement definitions.

use super::types::{
    AchievementCategory, AchievementDef, AchievementId, AchievementReward, AchievementTier,
};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // SHARED WITH THE BACKEND CATALOG
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::FirstCatch,
        name: "First Catch",
        description: "Catch your first fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Common,
        secret: false,
        shared: true,
        icon: "🐟",
        reward: AchievementReward {
            coins: 100,
            xp: 50,
        },
    },
    AchievementDef {
        id: AchievementId::Catch100,
        name: "Century Fisher",
        description: "Catch 100 fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: true,
        icon: "💯",
        reward: AchievementReward {
            coins: 1000,
            xp: 500,
        },
    },
    AchievementDef {
        id: AchievementId::Catch1000,
        name: "Master Angler",
        description: "Catch 1000 fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Epic,
        secret: false,
        shared: true,
        icon: "🏆",
        reward: AchievementReward {
            coins: 10000,
            xp: 5000,
        },
    },
    AchievementDef {
        id: AchievementId::GoldenKoi,
        name: "Legendary Hunter",
        description: "Catch a Golden Koi",
        category: AchievementCategory::Discovery,
        tier: AchievementTier::Legendary,
        secret: true,
        shared: true,
        icon: "⭐",
        reward: AchievementReward {
            coins: 5000,
            xp: 2500,
        },
    },
    AchievementDef {
        id: AchievementId::Level10,
        name: "Rising Star",
        description: "Reach level 10",
        category: AchievementCategory::Progression,
        tier: AchievementTier::Common,
        secret: false,
        shared: true,
        icon: "🌟",
        reward: AchievementReward {
            coins: 1000,
            xp: 500,
        },
    },
    AchievementDef {
        id: AchievementId::Level50,
        name: "Pro Angler",
        description: "Reach level 50",
        category: AchievementCategory::Progression,
        tier: AchievementTier::Rare,
        secret: false,
        shared: true,
        icon: "🎖️",
        reward: AchievementReward {
            coins: 5000,
            xp: 2500,
        },
    },
    AchievementDef {
        id: AchievementId::Level100,
        name: "Fishing Legend",
        description: "Reach level 100",
        category: AchievementCategory::Progression,
        tier: AchievementTier::Epic,
        secret: false,
        shared: true,
        icon: "👑",
        reward: AchievementReward {
            coins: 10000,
            xp: 5000,
        },
    },
    AchievementDef {
        id: AchievementId::Prestige1,
        name: "Reborn",
        description: "Prestige for the first time",
        category: AchievementCategory::Progression,
        tier: AchievementTier::Rare,
        secret: false,
        shared: true,
        icon: "♻️",
        reward: AchievementReward {
            coins: 5000,
            xp: 2500,
        },
    },
    AchievementDef {
        id: AchievementId::AllLures,
        name: "Collector",
        description: "Unlock all lures",
        category: AchievementCategory::Progression,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: true,
        icon: "🎣",
        reward: AchievementReward {
            coins: 2000,
            xp: 1000,
        },
    },
    AchievementDef {
        id: AchievementId::Perfect10,
        name: "Perfectionist",
        description: "Get 10 perfect catches",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: true,
        icon: "✨",
        reward: AchievementReward {
            coins: 500,
            xp: 250,
        },
    },
    AchievementDef {
        id: AchievementId::WhaleWatcher,
        name: "Whale Watcher",
        description: "See the whale 10 times",
        category: AchievementCategory::Events,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: true,
        icon: "🐋",
        reward: AchievementReward {
            coins: 1500,
            xp: 750,
        },
    },
    AchievementDef {
        id: AchievementId::StormFisher,
        name: "Storm Chaser",
        description: "Catch 50 fish in storms",
        category: AchievementCategory::Events,
        tier: AchievementTier::Rare,
        secret: false,
        shared: true,
        icon: "⛈️",
        reward: AchievementReward {
            coins: 3000,
            xp: 1500,
        },
    },
    // ═══════════════════════════════════════════════════════════════
    // LOCAL ACHIEVEMENTS
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Catch10,
        name: "Getting Started",
        description: "Catch 10 fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Common,
        secret: false,
        shared: false,
        icon: "🎣",
        reward: AchievementReward {
            coins: 200,
            xp: 100,
        },
    },
    AchievementDef {
        id: AchievementId::Catch50,
        name: "Hobby Fisher",
        description: "Catch 50 fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: false,
        icon: "🐠",
        reward: AchievementReward {
            coins: 500,
            xp: 250,
        },
    },
    AchievementDef {
        id: AchievementId::Catch500,
        name: "Dedicated Angler",
        description: "Catch 500 fish",
        category: AchievementCategory::Catching,
        tier: AchievementTier::Rare,
        secret: false,
        shared: false,
        icon: "🏅",
        reward: AchievementReward {
            coins: 5000,
            xp: 2500,
        },
    },
    AchievementDef {
        id: AchievementId::PerfectFirst,
        name: "Perfect!",
        description: "Get your first perfect catch",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Common,
        secret: false,
        shared: false,
        icon: "✨",
        reward: AchievementReward {
            coins: 200,
            xp: 100,
        },
    },
    AchievementDef {
        id: AchievementId::Perfect50,
        name: "Flawless Technique",
        description: "Get 50 perfect catches",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Rare,
        secret: false,
        shared: false,
        icon: "💫",
        reward: AchievementReward {
            coins: 2000,
            xp: 1000,
        },
    },
    AchievementDef {
        id: AchievementId::Combo3,
        name: "Combo Starter",
        description: "Get a 3x combo",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Common,
        secret: false,
        shared: false,
        icon: "🔥",
        reward: AchievementReward {
            coins: 100,
            xp: 50,
        },
    },
    AchievementDef {
        id: AchievementId::Combo5,
        name: "On Fire!",
        description: "Get a 5x combo",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: false,
        icon: "🔥",
        reward: AchievementReward {
            coins: 300,
            xp: 150,
        },
    },
    AchievementDef {
        id: AchievementId::Combo10,
        name: "Unstoppable",
        description: "Get a 10x combo",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Rare,
        secret: false,
        shared: false,
        icon: "⚡",
        reward: AchievementReward {
            coins: 1000,
            xp: 500,
        },
    },
    AchievementDef {
        id: AchievementId::Combo20,
        name: "Combo Master",
        description: "Get a 20x combo",
        category: AchievementCategory::Skill,
        tier: AchievementTier::Epic,
        secret: false,
        shared: false,
        icon: "💥",
        reward: AchievementReward {
            coins: 5000,
            xp: 2500,
        },
    },
    AchievementDef {
        id: AchievementId::BigFish,
        name: "Big One",
        description: "Catch a fish over 50cm",
        category: AchievementCategory::Size,
        tier: AchievementTier::Common,
        secret: false,
        shared: false,
        icon: "📏",
        reward: AchievementReward {
            coins: 300,
            xp: 150,
        },
    },
    AchievementDef {
        id: AchievementId::HugeFish,
        name: "Monster Catch",
        description: "Catch a fish over 100cm",
        category: AchievementCategory::Size,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: false,
        icon: "🦈",
        reward: AchievementReward {
            coins: 1000,
            xp: 500,
        },
    },
    AchievementDef {
        id: AchievementId::RareFirst,
        name: "Rare Find",
        description: "Catch your first rare fish",
        category: AchievementCategory::Discovery,
        tier: AchievementTier::Uncommon,
        secret: false,
        shared: false,
        icon: "💎",
        reward: AchievementReward {
            coins: 500,
            xp: 250,
        },
    },
];

/// Get the definition for a specific achievement.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Get achievements filtered by category.
pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}

/// The twelve achievements the backend serves, in its order.
pub fn shared_achievements() -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().filter(|a| a.shared).collect()
}
