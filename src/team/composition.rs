use super::roster::ChampionRoster;
use crate::api::models::Champion;
use crate::error::AppError;
use std::fmt;

pub const MAX_TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Ally,
    Enemy,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Ally => write!(f, "ally"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamState {
    Empty,
    Partial,
    Full,
}

#[derive(Debug, Clone)]
pub struct Team {
    side: Side,
    members: Vec<Champion>,
}

impl Team {
    pub fn new(side: Side) -> Self {
        Team {
            side,
            members: Vec::with_capacity(MAX_TEAM_SIZE),
        }
    }

    pub fn members(&self) -> &[Champion] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn state(&self) -> TeamState {
        match self.members.len() {
            0 => TeamState::Empty,
            n if n >= MAX_TEAM_SIZE => TeamState::Full,
            _ => TeamState::Partial,
        }
    }

    pub fn shortnames(&self) -> Vec<String> {
        self.members.iter().map(|c| c.shortname.clone()).collect()
    }

    fn push(&mut self, champion: Champion) -> Result<(), AppError> {
        if self.state() == TeamState::Full {
            return Err(AppError::TeamFull { side: self.side });
        }
        self.members.push(champion);
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<Champion, AppError> {
        let wanted = name.trim().to_lowercase();
        let idx = self
            .members
            .iter()
            .position(|c| c.name.to_lowercase() == wanted)
            .ok_or_else(|| AppError::NotOnTeam {
                name: name.trim().to_string(),
                side: self.side,
            })?;
        Ok(self.members.remove(idx))
    }
}

/// Sent to every observer after either team changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamUpdate {
    pub side: Side,
    pub allies: Vec<String>,
    pub enemies: Vec<String>,
}

pub trait TeamObserver {
    fn team_updated(&mut self, update: &TeamUpdate);
}

/// Both teams plus the observers that react to changes.
pub struct TeamComposition {
    roster: ChampionRoster,
    allies: Team,
    enemies: Team,
    observers: Vec<Box<dyn TeamObserver>>,
}

impl TeamComposition {
    pub fn new(roster: ChampionRoster) -> Self {
        TeamComposition {
            roster,
            allies: Team::new(Side::Ally),
            enemies: Team::new(Side::Enemy),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn TeamObserver>) {
        self.observers.push(observer);
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Ally => &self.allies,
            Side::Enemy => &self.enemies,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Ally => &mut self.allies,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Adds the champion named by `input` to one side. On success every
    /// observer is notified once; on failure nothing changes.
    pub fn validate(&mut self, side: Side, input: &str) -> Result<Champion, AppError> {
        let champion = self
            .roster
            .find(input)
            .cloned()
            .ok_or_else(|| AppError::NoSuchChampion(input.trim().to_string()))?;

        self.team_mut(side).push(champion.clone())?;
        log::debug!("Added {} to the {} team", champion.name, side);

        self.notify(side);
        Ok(champion)
    }

    pub fn remove(&mut self, side: Side, name: &str) -> Result<Champion, AppError> {
        let champion = self.team_mut(side).remove(name)?;
        log::debug!("Removed {} from the {} team", champion.name, side);

        self.notify(side);
        Ok(champion)
    }

    fn notify(&mut self, side: Side) {
        let update = TeamUpdate {
            side,
            allies: self.allies.shortnames(),
            enemies: self.enemies.shortnames(),
        };

        for observer in self.observers.iter_mut() {
            observer.team_updated(&update);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::roster::champion;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<TeamUpdate>>>);

    impl TeamObserver for Recorder {
        fn team_updated(&mut self, update: &TeamUpdate) {
            self.0.borrow_mut().push(update.clone());
        }
    }

    fn composition() -> (TeamComposition, Rc<RefCell<Vec<TeamUpdate>>>) {
        let roster = ChampionRoster::new(
            ["Ashe", "Annie", "Garen", "Lux", "Jinx", "Thresh", "Zed"]
                .iter()
                .map(|n| champion(n))
                .collect(),
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut comp = TeamComposition::new(roster);
        comp.subscribe(Box::new(Recorder(events.clone())));
        (comp, events)
    }

    #[test]
    fn team_moves_through_states() {
        let (mut comp, _) = composition();
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Empty);

        comp.validate(Side::Ally, "Annie").unwrap();
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Partial);

        for name in ["Garen", "Lux", "Jinx", "Thresh"] {
            comp.validate(Side::Ally, name).unwrap();
        }
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Full);
        assert_eq!(comp.team(Side::Enemy).state(), TeamState::Empty);
    }

    #[test]
    fn fifth_champion_fills_team_with_one_event() {
        let (mut comp, events) = composition();
        for name in ["Annie", "Garen", "Lux", "Jinx"] {
            comp.validate(Side::Ally, name).unwrap();
        }
        events.borrow_mut().clear();

        let added = comp.validate(Side::Ally, "Ashe").unwrap();
        assert_eq!(added.name, "Ashe");
        assert_eq!(comp.team(Side::Ally).len(), 5);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].allies.last().unwrap(), "ashe");
    }

    #[test]
    fn full_team_rejects_without_event() {
        let (mut comp, events) = composition();
        for name in ["Annie", "Garen", "Lux", "Jinx", "Thresh"] {
            comp.validate(Side::Enemy, name).unwrap();
        }
        events.borrow_mut().clear();

        let err = comp.validate(Side::Enemy, "Ashe").unwrap_err();
        assert!(matches!(err, AppError::TeamFull { side: Side::Enemy }));
        assert_eq!(comp.team(Side::Enemy).len(), 5);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn unknown_name_rejects_without_event() {
        let (mut comp, events) = composition();

        let err = comp.validate(Side::Ally, "Ashley").unwrap_err();
        assert!(matches!(err, AppError::NoSuchChampion(name) if name == "Ashley"));
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Empty);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn updates_carry_both_sides() {
        let (mut comp, events) = composition();
        comp.validate(Side::Ally, "ashe").unwrap();
        comp.validate(Side::Enemy, "ZED").unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            TeamUpdate {
                side: Side::Enemy,
                allies: vec!["ashe".to_string()],
                enemies: vec!["zed".to_string()],
            }
        );
    }

    #[test]
    fn removing_a_member_reopens_a_full_team() {
        let (mut comp, events) = composition();
        for name in ["Annie", "Garen", "Lux", "Jinx", "Thresh"] {
            comp.validate(Side::Ally, name).unwrap();
        }

        let removed = comp.remove(Side::Ally, "lux").unwrap();
        assert_eq!(removed.name, "Lux");
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Partial);
        assert_eq!(events.borrow().len(), 6);

        comp.validate(Side::Ally, "Ashe").unwrap();
        assert_eq!(comp.team(Side::Ally).state(), TeamState::Full);
    }

    #[test]
    fn removing_a_missing_member_fails() {
        let (mut comp, events) = composition();
        let err = comp.remove(Side::Enemy, "Zed").unwrap_err();
        assert!(matches!(err, AppError::NotOnTeam { side: Side::Enemy, .. }));
        assert!(events.borrow().is_empty());
    }
}
