//! Slide sequencing.
//!
//! Each stage of the landing page declares the actions to run when it is
//! entered, each with a delay. [`Sequencer::enter`] turns a stage change into
//! a [`Timeline`], and the timeline hands out actions as time passes. The page
//! script receives the same plan as JSON and only has to run the timers.

use serde::Serialize;

/// Stages of the landing page in slide order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Main,
    Results,
    Roadmap,
    Vacancies,
    Contacts,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Main,
        Stage::Results,
        Stage::Roadmap,
        Stage::Vacancies,
        Stage::Contacts,
    ];

    /// Slide index.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Locale key of the menu entry.
    pub fn menu_key(&self) -> &'static str {
        match self {
            Stage::Main => "menu.main",
            Stage::Results => "menu.results",
            Stage::Roadmap => "menu.graph",
            Stage::Vacancies => "menu.vacancies",
            Stage::Contacts => "menu.contacts",
        }
    }

    /// Actions run on every entry.
    fn entry_actions(&self) -> Vec<Scheduled> {
        use Action::*;
        match self {
            Stage::Main => vec![
                Scheduled::now(DeactivateSlider),
                Scheduled::now(DeactivateHeader),
                Scheduled::now(HideFooter),
                Scheduled::now(HidePagination),
            ],
            Stage::Results => vec![
                Scheduled::now(ActivateSlider),
                Scheduled::now(ActivateHeader),
                Scheduled::now(ShowFooter),
                Scheduled::now(ShowPagination),
                Scheduled::after(700, RevealResultsGraph),
            ],
            Stage::Roadmap => vec![
                Scheduled::after(500, ShowOverlay),
                Scheduled::after(700, RevealOverHidden),
                Scheduled::after(1700, ActivateStageMarker),
            ],
            Stage::Vacancies => vec![Scheduled::now(ShowFooter)],
            Stage::Contacts => vec![
                Scheduled::now(ActivateSlider),
                Scheduled::now(ActivateHeader),
                Scheduled::now(ShowFooter),
                Scheduled::now(ShowPagination),
            ],
        }
    }

    /// Actions run on the first entry only.
    fn first_entry_actions(&self) -> Vec<Scheduled> {
        match self {
            Stage::Results => vec![Scheduled::after(500, Action::StartCounters)],
            _ => Vec::new(),
        }
    }
}

/// A visual effect on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ActivateSlider,
    DeactivateSlider,
    ActivateHeader,
    DeactivateHeader,
    ShowFooter,
    HideFooter,
    ShowPagination,
    HidePagination,
    RevealResultsGraph,
    StartCounters,
    ShowOverlay,
    RevealOverHidden,
    ActivateStageMarker,
}

impl Action {
    /// CSS selector the action applies to.
    pub fn selector(&self) -> &'static str {
        match self {
            Action::ActivateSlider | Action::DeactivateSlider => "#home-slider",
            Action::ActivateHeader | Action::DeactivateHeader => ".header-in",
            Action::ShowFooter | Action::HideFooter => ".footer",
            Action::ShowPagination | Action::HidePagination => ".swiper-pagination",
            Action::RevealResultsGraph => ".result-graph-in",
            Action::StartCounters => ".counter-up",
            Action::ShowOverlay => ".overlay",
            Action::RevealOverHidden => ".over-hidden",
            Action::ActivateStageMarker => ".stage",
        }
    }
}

/// An action and its delay from stage entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduled {
    pub delay_ms: u64,
    pub action: Action,
    /// Target of the action, for the page script.
    pub selector: &'static str,
}

impl Scheduled {
    pub fn now(action: Action) -> Self {
        Self::after(0, action)
    }

    pub fn after(delay_ms: u64, action: Action) -> Self {
        Self {
            delay_ms,
            action,
            selector: action.selector(),
        }
    }
}

/// Pending actions of one stage entry, ordered by delay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pending: Vec<Scheduled>,
}

impl Timeline {
    fn new(mut pending: Vec<Scheduled>) -> Self {
        // Stable: equal delays keep their declared order.
        pending.sort_by_key(|s| s.delay_ms);
        Self { pending }
    }

    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every action due at `elapsed_ms`.
    pub fn due(&mut self, elapsed_ms: u64) -> Vec<Action> {
        let split = self
            .pending
            .iter()
            .position(|s| s.delay_ms > elapsed_ms)
            .unwrap_or(self.pending.len());
        self.pending.drain(..split).map(|s| s.action).collect()
    }
}

/// Tracks the current stage and the one-shot actions already spent.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    current: Option<Stage>,
    visited: Vec<Stage>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Stage> {
        self.current
    }

    /// Enter `stage`, replacing whatever timeline the previous stage had.
    pub fn enter(&mut self, stage: Stage) -> Timeline {
        let mut actions = stage.entry_actions();
        if !self.visited.contains(&stage) {
            actions.extend(stage.first_entry_actions());
            self.visited.push(stage);
        }
        self.current = Some(stage);
        tracing::trace!(?stage, actions = actions.len(), "Entered stage");
        Timeline::new(actions)
    }
}

/// Per-stage plan handed to the page script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePlanEntry {
    pub stage: Stage,
    pub index: usize,
    pub menu_key: &'static str,
    pub on_enter: Vec<Scheduled>,
    pub on_first_enter: Vec<Scheduled>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StagePlan {
    pub stages: Vec<StagePlanEntry>,
}

impl StagePlan {
    pub fn standard() -> Self {
        let stages = Stage::ALL
            .iter()
            .map(|stage| StagePlanEntry {
                stage: *stage,
                index: stage.index(),
                menu_key: stage.menu_key(),
                on_enter: Timeline::new(stage.entry_actions()).pending,
                on_first_enter: stage.first_entry_actions(),
            })
            .collect();
        Self { stages }
    }

    /// JSON safe to inline in a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_schedule() {
        let mut sequencer = Sequencer::new();
        let mut timeline = sequencer.enter(Stage::Results);

        let now = timeline.due(0);
        assert_eq!(
            now,
            vec![
                Action::ActivateSlider,
                Action::ActivateHeader,
                Action::ShowFooter,
                Action::ShowPagination
            ]
        );
        assert!(timeline.due(499).is_empty());
        assert_eq!(timeline.due(500), vec![Action::StartCounters]);
        assert_eq!(timeline.due(10_000), vec![Action::RevealResultsGraph]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_counters_start_once() {
        let mut sequencer = Sequencer::new();
        sequencer.enter(Stage::Results);
        sequencer.enter(Stage::Roadmap);
        let timeline = sequencer.enter(Stage::Results);

        assert!(timeline
            .pending()
            .iter()
            .all(|s| s.action != Action::StartCounters));
        assert_eq!(sequencer.current(), Some(Stage::Results));
    }

    #[test]
    fn test_roadmap_order() {
        let mut timeline = Sequencer::new().enter(Stage::Roadmap);
        assert!(timeline.due(0).is_empty());
        assert_eq!(timeline.due(700), vec![Action::ShowOverlay, Action::RevealOverHidden]);
        assert_eq!(timeline.due(1700), vec![Action::ActivateStageMarker]);
    }

    #[test]
    fn test_main_hides_chrome() {
        let mut timeline = Sequencer::new().enter(Stage::Main);
        let actions = timeline.due(0);
        assert!(actions.contains(&Action::HideFooter));
        assert!(actions.contains(&Action::DeactivateSlider));
    }

    #[test]
    fn test_plan_json() {
        let plan = StagePlan::standard();
        assert_eq!(plan.stages.len(), 5);
        assert_eq!(Stage::from_index(2), Some(Stage::Roadmap));

        let json: serde_json::Value =
            serde_json::from_str(&plan.to_script_json().unwrap()).unwrap();
        assert_eq!(json["stages"][1]["stage"], "results");
        assert_eq!(json["stages"][1]["onFirstEnter"][0]["action"], "start-counters");
        assert_eq!(json["stages"][1]["onFirstEnter"][0]["delayMs"], 500);
        assert_eq!(json["stages"][1]["onFirstEnter"][0]["selector"], ".counter-up");
    }
}
