use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Core stat block: leveling, health, mana, combat stats, and gold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub(crate) name: String,
    pub(crate) level: i32,
    pub(crate) experience: i32,
    pub(crate) max_health: i32,
    pub(crate) current_health: i32,
    pub(crate) max_mana: i32,
    pub(crate) current_mana: i32,
    pub(crate) strength: i32,
    pub(crate) defense: i32,
    pub(crate) intelligence: i32,
    pub(crate) agility: i32,
    pub(crate) gold: i32,
}

impl PlayerStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            experience: 0,
            max_health: 100,
            current_health: 100,
            max_mana: 50,
            current_mana: 50,
            strength: 10,
            defense: 5,
            intelligence: 8,
            agility: 7,
            gold: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub fn current_mana(&self) -> i32 {
        self.current_mana
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn intelligence(&self) -> i32 {
        self.intelligence
    }

    pub fn agility(&self) -> i32 {
        self.agility
    }

    pub fn gold(&self) -> i32 {
        self.gold
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Applies `damage` reduced by defense (floor 0); health clamps at 0.
    pub fn take_damage(&mut self, damage: i32) {
        let actual = (damage - self.defense).max(0);
        self.current_health = (self.current_health - actual).max(0);
        info!(
            "{} took {} damage ({}/{} HP)",
            self.name, actual, self.current_health, self.max_health
        );
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
        info!(
            "{} restored {} HP ({}/{} HP)",
            self.name, amount, self.current_health, self.max_health
        );
    }

    pub fn restore_mana(&mut self, amount: i32) {
        self.current_mana = (self.current_mana + amount).min(self.max_mana);
        info!(
            "{} restored {} MP ({}/{} MP)",
            self.name, amount, self.current_mana, self.max_mana
        );
    }

    /// Deducts `amount` mana, or fails without deducting anything.
    pub fn use_mana(&mut self, amount: i32) -> bool {
        if self.current_mana >= amount {
            self.current_mana -= amount;
            return true;
        }
        warn!("{} is out of mana ({} needed)", self.name, amount);
        false
    }

    pub fn modify_strength(&mut self, amount: i32) {
        self.strength += amount;
    }

    pub fn modify_defense(&mut self, amount: i32) {
        self.defense += amount;
    }

    pub fn modify_intelligence(&mut self, amount: i32) {
        self.intelligence += amount;
    }

    pub fn modify_agility(&mut self, amount: i32) {
        self.agility += amount;
    }

    pub fn add_gold(&mut self, amount: i32) {
        self.gold += amount;
        info!("{} gained {} gold ({} total)", self.name, amount, self.gold);
    }

    /// Deducts `amount` gold, or fails without deducting anything.
    pub fn spend_gold(&mut self, amount: i32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            info!("{} spent {} gold ({} remaining)", self.name, amount, self.gold);
            return true;
        }
        warn!(
            "{} cannot spend {} gold, only {} available",
            self.name, amount, self.gold
        );
        false
    }

    /// Adds experience and levels up once per `level * 100` threshold
    /// crossed, carrying the remainder. Reaching a threshold exactly counts.
    pub fn gain_experience(&mut self, amount: i32) {
        self.experience += amount;
        info!("{} gained {} experience", self.name, amount);

        while self.experience >= self.level * 100 {
            self.experience -= self.level * 100;
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.max_health += 20;
        self.current_health = self.max_health;
        self.max_mana += 10;
        self.current_mana = self.max_mana;
        self.strength += 2;
        self.defense += 1;
        self.intelligence += 2;
        self.agility += 1;
        info!("{} reached level {}", self.name, self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_reduced_by_defense_and_floors_at_zero() {
        let mut stats = PlayerStats::new("Hero");
        stats.take_damage(15);
        assert_eq!(stats.current_health(), 90);

        stats.take_damage(3);
        assert_eq!(stats.current_health(), 90);

        stats.take_damage(10_000);
        assert_eq!(stats.current_health(), 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn healing_clamps_at_max() {
        let mut stats = PlayerStats::new("Hero");
        stats.take_damage(25);
        stats.heal(500);
        assert_eq!(stats.current_health(), stats.max_health());
    }

    #[test]
    fn mana_restore_clamps_and_use_fails_when_short() {
        let mut stats = PlayerStats::new("Hero");
        assert!(stats.use_mana(30));
        assert_eq!(stats.current_mana(), 20);
        assert!(!stats.use_mana(21));
        assert_eq!(stats.current_mana(), 20);
        stats.restore_mana(999);
        assert_eq!(stats.current_mana(), stats.max_mana());
    }

    #[test]
    fn spend_gold_fails_without_deducting() {
        let mut stats = PlayerStats::new("Hero");
        stats.add_gold(10);
        assert!(!stats.spend_gold(11));
        assert_eq!(stats.gold(), 10);
        assert!(stats.spend_gold(10));
        assert_eq!(stats.gold(), 0);
    }

    #[test]
    fn experience_at_exact_threshold_levels_up() {
        let mut stats = PlayerStats::new("Hero");
        stats.gain_experience(99);
        assert_eq!(stats.level(), 1);
        stats.gain_experience(1);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.experience(), 0);
    }

    #[test]
    fn one_gain_can_cross_multiple_thresholds() {
        let mut stats = PlayerStats::new("Hero");
        stats.gain_experience(300);
        // 300 - 100 (level 1) - 200 (level 2) = 0
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.experience(), 0);
    }

    #[test]
    fn level_up_raises_caps_refills_and_bumps_combat_stats() {
        let mut stats = PlayerStats::new("Hero");
        stats.take_damage(40);
        stats.gain_experience(100);

        assert_eq!(stats.max_health(), 120);
        assert_eq!(stats.current_health(), 120);
        assert_eq!(stats.max_mana(), 60);
        assert_eq!(stats.current_mana(), 60);
        assert_eq!(stats.strength(), 12);
        assert_eq!(stats.defense(), 6);
        assert_eq!(stats.intelligence(), 10);
        assert_eq!(stats.agility(), 8);
    }
}
