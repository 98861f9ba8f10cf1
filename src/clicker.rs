//! Clicker sub-game
//!
//! Manual clicks plus a once-per-second auto income. Crossing the level
//! threshold raises the per-click value and doubles the next threshold.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Starting values
const START_PER_CLICK: u64 = 1;
const START_AUTO_RATE: u64 = 1;
const START_THRESHOLD: u64 = 100;
/// Auto income interval (ms)
const AUTO_INTERVAL_MS: f64 = 1000.0;

/// Purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// +1 point per click
    PerClick,
    /// Doubles auto income
    AutoRate,
    /// Points per click x4
    QuadrupleClick,
    /// Points per click x5
    QuintupleClick,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::PerClick,
        Upgrade::AutoRate,
        Upgrade::QuadrupleClick,
        Upgrade::QuintupleClick,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Upgrade::PerClick => "Points per Click",
            Upgrade::AutoRate => "Auto Click",
            Upgrade::QuadrupleClick => "Double Points",
            Upgrade::QuintupleClick => "Multiply by 5",
        }
    }

    fn starting_cost(&self) -> u64 {
        match self {
            Upgrade::PerClick => 10,
            Upgrade::AutoRate => 20,
            Upgrade::QuadrupleClick => 50,
            Upgrade::QuintupleClick => 100,
        }
    }

    /// Cost after a successful purchase
    fn next_cost(&self, cost: u64) -> u64 {
        match self {
            Upgrade::PerClick => cost * 3 / 2,
            Upgrade::AutoRate => cost * 3,
            Upgrade::QuadrupleClick => cost * 10,
            Upgrade::QuintupleClick => cost * 100,
        }
    }

    fn index(&self) -> usize {
        match self {
            Upgrade::PerClick => 0,
            Upgrade::AutoRate => 1,
            Upgrade::QuadrupleClick => 2,
            Upgrade::QuintupleClick => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClickerError {
    #[error("not enough score for upgrade: need {needed}, have {available}")]
    InsufficientScore { needed: u64, available: u64 },
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickerEvent {
    LevelUp { level: u32 },
    UpgradePurchased { upgrade: Upgrade },
    UpgradeRejected { upgrade: Upgrade },
}

/// Clicker game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clicker {
    pub score: u64,
    pub per_click: u64,
    pub level: u32,
    /// Score needed for the next level
    pub level_threshold: u64,
    /// Points added per second
    pub auto_rate: u64,
    /// Current cost of each upgrade, indexed like `Upgrade::ALL`
    costs: [u64; 4],
    #[serde(skip)]
    accumulator: f64,
    #[serde(skip)]
    events: Vec<ClickerEvent>,
}

impl Default for Clicker {
    fn default() -> Self {
        Self {
            score: 0,
            per_click: START_PER_CLICK,
            level: 1,
            level_threshold: START_THRESHOLD,
            auto_rate: START_AUTO_RATE,
            costs: Upgrade::ALL.map(|u| u.starting_cost()),
            accumulator: 0.0,
            events: Vec::new(),
        }
    }
}

impl Clicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual click
    pub fn click(&mut self) -> u64 {
        self.add_points(self.per_click);
        self.per_click
    }

    /// Feed elapsed time (ms); pays auto income once per whole second.
    /// Returns the points earned.
    pub fn advance(&mut self, dt_ms: f64) -> u64 {
        self.accumulator += dt_ms.max(0.0);
        let mut earned = 0;
        while self.accumulator >= AUTO_INTERVAL_MS {
            self.accumulator -= AUTO_INTERVAL_MS;
            earned += self.auto_rate;
        }
        if earned > 0 {
            self.add_points(earned);
        }
        earned
    }

    /// Credit points earned elsewhere (e.g. a finished Survival run)
    pub fn deposit(&mut self, points: u64) {
        self.add_points(points);
    }

    /// Progress toward the next level, 0-100
    pub fn progress(&self) -> f32 {
        (self.score as f64 / self.level_threshold as f64 * 100.0).min(100.0) as f32
    }

    pub fn cost(&self, upgrade: Upgrade) -> u64 {
        self.costs[upgrade.index()]
    }

    /// Buy an upgrade if affordable. Rejection leaves the state unchanged.
    pub fn purchase(&mut self, upgrade: Upgrade) -> Result<(), ClickerError> {
        let cost = self.cost(upgrade);
        if self.score < cost {
            self.events.push(ClickerEvent::UpgradeRejected { upgrade });
            return Err(ClickerError::InsufficientScore {
                needed: cost,
                available: self.score,
            });
        }

        self.score -= cost;
        match upgrade {
            Upgrade::PerClick => self.per_click += 1,
            Upgrade::AutoRate => self.auto_rate *= 2,
            Upgrade::QuadrupleClick => self.per_click *= 4,
            Upgrade::QuintupleClick => self.per_click *= 5,
        }
        self.costs[upgrade.index()] = upgrade.next_cost(cost);
        log::info!("Purchased {} for {}", upgrade.as_str(), cost);
        self.events.push(ClickerEvent::UpgradePurchased { upgrade });
        Ok(())
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<ClickerEvent> {
        std::mem::take(&mut self.events)
    }

    fn add_points(&mut self, points: u64) {
        self.score += points;
        while self.score >= self.level_threshold {
            self.level += 1;
            self.per_click += 1;
            self.level_threshold *= 2;
            log::info!("Clicker level {}", self.level);
            self.events.push(ClickerEvent::LevelUp { level: self.level });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_adds_per_click() {
        let mut clicker = Clicker::new();
        assert_eq!(clicker.click(), 1);
        assert_eq!(clicker.score, 1);
    }

    #[test]
    fn test_auto_income_per_second() {
        let mut clicker = Clicker::new();
        assert_eq!(clicker.advance(999.0), 0);
        assert_eq!(clicker.advance(1.0), 1);
        assert_eq!(clicker.advance(2500.0), 2);
        assert_eq!(clicker.score, 3);
    }

    #[test]
    fn test_level_up_doubles_threshold() {
        let mut clicker = Clicker::new();
        clicker.deposit(100);
        assert_eq!(clicker.level, 2);
        assert_eq!(clicker.per_click, 2);
        assert_eq!(clicker.level_threshold, 200);
        assert_eq!(clicker.drain_events(), vec![ClickerEvent::LevelUp { level: 2 }]);

        // Big deposit crosses several thresholds at once
        clicker.deposit(600);
        assert_eq!(clicker.level, 4);
        assert_eq!(clicker.level_threshold, 800);
    }

    #[test]
    fn test_progress() {
        let mut clicker = Clicker::new();
        clicker.deposit(25);
        assert!((clicker.progress() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_purchase_rejected_when_poor() {
        let mut clicker = Clicker::new();
        clicker.deposit(5);
        let err = clicker.purchase(Upgrade::PerClick).unwrap_err();
        assert_eq!(
            err,
            ClickerError::InsufficientScore {
                needed: 10,
                available: 5
            }
        );
        assert_eq!(clicker.score, 5);
        assert_eq!(clicker.per_click, 1);
        assert_eq!(
            clicker.drain_events(),
            vec![ClickerEvent::UpgradeRejected {
                upgrade: Upgrade::PerClick
            }]
        );
    }

    #[test]
    fn test_upgrades_apply_and_escalate() {
        let mut clicker = Clicker::new();
        clicker.deposit(90);

        clicker.purchase(Upgrade::PerClick).unwrap();
        assert_eq!(clicker.per_click, 2);
        assert_eq!(clicker.cost(Upgrade::PerClick), 15);
        assert_eq!(clicker.score, 80);

        clicker.purchase(Upgrade::AutoRate).unwrap();
        assert_eq!(clicker.auto_rate, 2);
        assert_eq!(clicker.cost(Upgrade::AutoRate), 60);

        clicker.purchase(Upgrade::QuadrupleClick).unwrap();
        assert_eq!(clicker.per_click, 8);
        assert_eq!(clicker.cost(Upgrade::QuadrupleClick), 500);
        assert_eq!(clicker.score, 10);
    }

    #[test]
    fn test_quintuple_click() {
        let mut clicker = Clicker::new();
        clicker.level_threshold = u64::MAX;
        clicker.deposit(100);
        clicker.purchase(Upgrade::QuintupleClick).unwrap();
        assert_eq!(clicker.per_click, 5);
        assert_eq!(clicker.cost(Upgrade::QuintupleClick), 10_000);
    }

    #[test]
    fn test_per_click_cost_floors() {
        let mut clicker = Clicker::new();
        clicker.level_threshold = u64::MAX;
        clicker.deposit(10 + 15 + 22);
        clicker.purchase(Upgrade::PerClick).unwrap();
        clicker.purchase(Upgrade::PerClick).unwrap();
        // 15 * 1.5 = 22.5 -> 22
        assert_eq!(clicker.cost(Upgrade::PerClick), 22);
        clicker.purchase(Upgrade::PerClick).unwrap();
        assert_eq!(clicker.cost(Upgrade::PerClick), 33);
        assert_eq!(clicker.score, 0);
    }
}
