//! The tracing session: one shuffled run through the figure sequence.
//!
//! Per figure the session moves `Instructions -> Tracing -> Result`, then on
//! to the next figure's `Tracing` (the instructions are shown only once).
//! The session ends on an explicit terminate, after the last figure, or when
//! the session clock reaches its limit. Whichever comes first delivers the
//! statistics to the [`StatsSink`]; later triggers are ignored.

use crate::capture::{PathCapture, SurfaceMapping};
use crate::catalog::provider::{CatalogError, FigureCatalog};
use crate::clock::{Clock, SessionClock, SessionTick};
use crate::config::{
    load_session_config, set_json, ConfigError, KvStore, SessionConfig, SESSION_STATS_KEY,
};
use crate::figure::{Figure, FigureId};
use crate::render::{Frame, RenderMode, FIGURE_CENTER};
use crate::sequencer::FigureSequence;
use chrono::{DateTime, Local};
use kurbo::{Point, Vec2};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Largest random shift of a figure, as a fraction of the surface center
pub const OFFSET_FRACTION: f64 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Phase {
    Instructions,
    Tracing,
    Result,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureAttemptStat {
    pub figure: Figure,
    pub elapsed_seconds: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    /// Every figure in the sequence was traced
    #[strum(serialize = "completed")]
    Completed,
    /// The user ended the session
    #[strum(serialize = "terminated")]
    Terminated,
    /// The session clock ran out
    #[strum(serialize = "time expired")]
    TimeExpired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub attempts: Vec<FigureAttemptStat>,
    pub reason: EndReason,
    pub finished_at: DateTime<Local>,
}

impl SessionStats {
    pub fn completed_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.completed).count()
    }

    pub fn total_seconds(&self) -> u32 {
        self.attempts.iter().map(|a| a.elapsed_seconds).sum()
    }

    pub fn average_seconds(&self) -> Option<f64> {
        if self.attempts.is_empty() {
            None
        } else {
            Some(self.total_seconds() as f64 / self.attempts.len() as f64)
        }
    }
}

/// Receives the statistics once, when the session ends.
pub trait StatsSink {
    fn deliver(&mut self, stats: &SessionStats);
}

/// Writes the statistics to the store under `sessionStats`.
pub struct StoreStatsSink<S: KvStore> {
    store: S,
}

impl<S: KvStore> StoreStatsSink<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KvStore> StatsSink for StoreStatsSink<S> {
    fn deliver(&mut self, stats: &SessionStats) {
        if let Err(e) = set_json(&self.store, SESSION_STATS_KEY, stats) {
            tracing::error!(error = %e, "failed to store session stats");
        }
    }
}

/// Keeps every delivery in memory; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    delivered: Arc<Mutex<Vec<SessionStats>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<SessionStats> {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StatsSink for CollectingSink {
    fn deliver(&mut self, stats: &SessionStats) {
        self.delivered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(stats.clone());
    }
}

/// Per-session random placement of each figure, drawn the first time the
/// figure is shown and reused for every later frame.
pub struct OffsetTable {
    rng: StdRng,
    max: Vec2,
    offsets: HashMap<FigureId, Vec2>,
}

impl OffsetTable {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            max: FIGURE_CENTER.to_vec2() * OFFSET_FRACTION,
            offsets: HashMap::new(),
        }
    }

    pub fn offset(&mut self, id: &FigureId) -> Vec2 {
        let Self { rng, max, offsets } = self;
        *offsets.entry(id.clone()).or_insert_with(|| {
            Vec2::new(
                (rng.gen::<f64>() - 0.5) * 2.0 * max.x,
                (rng.gen::<f64>() - 0.5) * 2.0 * max.y,
            )
        })
    }

    pub fn get(&self, id: &FigureId) -> Option<Vec2> {
        self.offsets.get(id).copied()
    }
}

pub struct Session {
    config: SessionConfig,
    figures: FigureSequence,
    index: usize,
    phase: Phase,
    capture: PathCapture,
    mapping: SurfaceMapping,
    figure_clock: Clock,
    session_clock: SessionClock,
    attempts: Vec<FigureAttemptStat>,
    offsets: OffsetTable,
    sink: Box<dyn StatsSink>,
    outcome: Option<SessionStats>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("index", &self.index)
            .field("figures", &self.figures.len())
            .field("attempts", &self.attempts)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        config: SessionConfig,
        figures: FigureSequence,
        sink: Box<dyn StatsSink>,
        rng: StdRng,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        tracing::info!(
            figures = figures.len(),
            minutes = config.duration,
            difficulty = %config.difficulty,
            "session created"
        );
        Ok(Self {
            session_clock: SessionClock::new(config.limit_seconds()),
            config,
            figures,
            index: 0,
            phase: Phase::Instructions,
            capture: PathCapture::new(),
            mapping: SurfaceMapping::IDENTITY,
            figure_clock: Clock::default(),
            attempts: Vec::new(),
            offsets: OffsetTable::new(rng),
            sink,
            outcome: None,
        })
    }

    /// Read the configuration and catalog from `store` and shuffle a fresh
    /// sequence. Fails with `ConfigError::Missing` when setup never ran.
    pub fn prepare(
        store: &dyn KvStore,
        sink: Box<dyn StatsSink>,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        let config = load_session_config(store)?;
        let catalog = FigureCatalog::load(store)?;
        let pool = catalog.pool(config.pool, config.difficulty);
        let figures = FigureSequence::shuffled(&pool, &mut rng);
        Self::new(config, figures, sink, rng)
    }

    /// Space: begin, finish or advance depending on the phase
    pub fn proceed(&mut self) {
        match self.phase {
            Phase::Instructions => self.begin(),
            Phase::Tracing => self.finish(),
            Phase::Result => self.advance(),
            Phase::Ended => {}
        }
    }

    /// Dismiss the instructions and start tracing the first figure
    pub fn begin(&mut self) {
        if self.phase != Phase::Instructions {
            return;
        }
        if self.figures.is_empty() {
            tracing::warn!("no figures to trace");
            self.terminate(EndReason::Completed);
            return;
        }
        self.figure_clock.reset();
        self.figure_clock.start();
        if self.session_clock.start_once() {
            tracing::info!(
                limit_seconds = self.session_clock.limit_seconds(),
                "session clock started"
            );
        }
        self.phase = Phase::Tracing;
    }

    /// Stop tracing the current figure and record the attempt
    pub fn finish(&mut self) {
        if self.phase != Phase::Tracing {
            return;
        }
        let Some(figure) = self.figures.get(self.index).cloned() else {
            return;
        };
        self.figure_clock.stop();
        self.capture.pointer_up();
        let elapsed_seconds = self.figure_clock.elapsed_seconds();
        tracing::info!(
            id = %figure.id,
            seconds = elapsed_seconds,
            strokes = self.capture.strokes().len(),
            "figure finished"
        );
        self.attempts.push(FigureAttemptStat {
            figure,
            elapsed_seconds,
            completed: true,
        });
        self.phase = Phase::Result;
    }

    /// Move on from the result view, or end the session after the last figure
    pub fn advance(&mut self) {
        if self.phase != Phase::Result {
            return;
        }
        if !self.has_next() {
            self.terminate(EndReason::Completed);
            return;
        }
        self.index += 1;
        self.capture.clear();
        self.figure_clock.reset();
        self.figure_clock.start();
        self.phase = Phase::Tracing;
        tracing::info!(index = self.index, "advanced to next figure");
    }

    /// End the session. Only the first call has any effect; it returns
    /// whether this call ended the session.
    pub fn terminate(&mut self, reason: EndReason) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.figure_clock.stop();
        self.session_clock.stop();
        self.capture.pointer_up();
        self.phase = Phase::Ended;

        let stats = SessionStats {
            attempts: std::mem::take(&mut self.attempts),
            reason,
            finished_at: Local::now(),
        };
        tracing::info!(
            %reason,
            attempts = stats.attempts.len(),
            elapsed = self.session_clock.elapsed_seconds(),
            "session ended"
        );
        self.sink.deliver(&stats);
        self.outcome = Some(stats);
        true
    }

    /// One second passed
    pub fn tick(&mut self) {
        if self.is_ended() {
            return;
        }
        self.figure_clock.tick();
        match self.session_clock.tick() {
            SessionTick::Expired => {
                self.terminate(EndReason::TimeExpired);
            }
            SessionTick::Running(elapsed) if elapsed % 60 == 0 => {
                tracing::debug!(
                    elapsed,
                    remaining = self.session_clock.remaining_seconds(),
                    "session clock"
                );
            }
            _ => {}
        }
    }

    pub fn set_surface_mapping(&mut self, mapping: SurfaceMapping) {
        self.mapping = mapping;
    }

    pub fn surface_mapping(&self) -> SurfaceMapping {
        self.mapping
    }

    pub fn pointer_down(&mut self, screen: Point) {
        let at = self.mapping.to_surface(screen);
        if self.phase == Phase::Tracing {
            self.capture.pointer_down(at);
        } else {
            self.capture.hover(at);
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let at = self.mapping.to_surface(screen);
        if self.phase == Phase::Tracing {
            self.capture.pointer_move(at);
        } else {
            self.capture.hover(at);
        }
    }

    pub fn pointer_up(&mut self) {
        self.capture.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.capture.pointer_leave();
    }

    /// Figure center for the current figure, offset drawn on first use
    pub fn figure_origin(&mut self) -> Point {
        match self.figures.get(self.index) {
            Some(figure) => FIGURE_CENTER + self.offsets.offset(&figure.id),
            None => FIGURE_CENTER,
        }
    }

    /// State for the renderer
    pub fn frame(&mut self) -> Frame<'_> {
        let mode = match self.phase {
            Phase::Tracing => RenderMode::Tracing,
            Phase::Result => RenderMode::Comparison,
            Phase::Instructions | Phase::Ended => RenderMode::Blank,
        };
        let origin = if mode == RenderMode::Blank {
            FIGURE_CENTER
        } else {
            self.figure_origin()
        };
        Frame {
            mode,
            figure: self.current_figure(),
            origin,
            strokes: self.capture.strokes(),
            active: self.capture.active(),
            pointer: self.capture.pointer(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.figures.len()
    }

    pub fn current_figure(&self) -> Option<&Figure> {
        self.figures.get(self.index)
    }

    pub fn figure_seconds(&self) -> u32 {
        self.figure_clock.elapsed_seconds()
    }

    pub fn session_seconds(&self) -> u32 {
        self.session_clock.elapsed_seconds()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session_clock.remaining_seconds()
    }

    pub fn is_session_clock_running(&self) -> bool {
        self.session_clock.is_running()
    }

    pub fn is_figure_clock_running(&self) -> bool {
        self.figure_clock.is_running()
    }

    /// Attempts recorded so far; empty once the session has ended
    pub fn attempts(&self) -> &[FigureAttemptStat] {
        &self.attempts
    }

    pub fn capture(&self) -> &PathCapture {
        &self.capture
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Final statistics, once the session has ended
    pub fn outcome(&self) -> Option<&SessionStats> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryKvStore;
    use crate::figure::{Difficulty, FigureKind};
    use assert_matches::assert_matches;
    use rand::SeedableRng;

    fn figures(n: usize) -> FigureSequence {
        FigureSequence::ordered(
            (0..n)
                .map(|i| Figure::shape(&format!("f{i}"), FigureKind::Geometric, Difficulty::Easy))
                .collect(),
        )
    }

    fn config(minutes: u32) -> SessionConfig {
        SessionConfig {
            duration: minutes,
            ..SessionConfig::default()
        }
    }

    fn session(n: usize, minutes: u32) -> (Session, CollectingSink) {
        let sink = CollectingSink::new();
        let session = Session::new(
            config(minutes),
            figures(n),
            Box::new(sink.clone()),
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        (session, sink)
    }

    fn ticks(session: &mut Session, n: u32) {
        for _ in 0..n {
            session.tick();
        }
    }

    #[test]
    fn test_phase_cycle() {
        let (mut s, _) = session(2, 1);
        assert_eq!(s.phase(), Phase::Instructions);

        s.proceed();
        assert_eq!(s.phase(), Phase::Tracing);
        assert!(s.is_figure_clock_running());
        assert!(s.is_session_clock_running());

        s.proceed();
        assert_eq!(s.phase(), Phase::Result);
        assert!(!s.is_figure_clock_running());

        s.proceed();
        assert_eq!(s.phase(), Phase::Tracing);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_figure_clock_pauses_and_resets() {
        let (mut s, _) = session(2, 10);
        ticks(&mut s, 3);
        assert_eq!(s.figure_seconds(), 0);
        assert_eq!(s.session_seconds(), 0);

        s.proceed();
        ticks(&mut s, 4);
        s.proceed();
        ticks(&mut s, 2);
        assert_eq!(s.figure_seconds(), 4);
        assert_eq!(s.session_seconds(), 6);

        s.proceed();
        assert_eq!(s.figure_seconds(), 0);
        ticks(&mut s, 1);
        assert_eq!(s.figure_seconds(), 1);
        assert_eq!(s.session_seconds(), 7);
    }

    #[test]
    fn test_finish_records_attempt() {
        let (mut s, _) = session(3, 1);
        s.proceed();
        ticks(&mut s, 5);
        s.proceed();

        assert_eq!(s.attempts().len(), 1);
        let stat = &s.attempts()[0];
        assert_eq!(stat.elapsed_seconds, 5);
        assert!(stat.completed);
        assert_eq!(stat.figure.id.as_str(), "f0");
    }

    #[test]
    fn test_last_figure_completes_session() {
        let (mut s, sink) = session(1, 1);
        s.proceed();
        s.proceed();
        assert!(!s.has_next());
        s.proceed();

        assert!(s.is_ended());
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].reason, EndReason::Completed);
        assert_eq!(delivered[0].attempts.len(), 1);
    }

    #[test]
    fn test_termination_is_idempotent() {
        let (mut s, sink) = session(3, 1);
        s.proceed();
        assert!(s.terminate(EndReason::Terminated));
        assert!(!s.terminate(EndReason::Terminated));
        assert!(!s.terminate(EndReason::Completed));
        s.proceed();
        ticks(&mut s, 120);

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].reason, EndReason::Terminated);
        assert_eq!(s.outcome().map(|o| o.reason), Some(EndReason::Terminated));
    }

    #[test]
    fn test_expiry_terminates_once() {
        let (mut s, sink) = session(3, 1);
        s.proceed();
        ticks(&mut s, 59);
        assert!(!s.is_ended());
        ticks(&mut s, 1);
        assert!(s.is_ended());
        s.terminate(EndReason::Terminated);
        ticks(&mut s, 10);

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].reason, EndReason::TimeExpired);
        assert!(delivered[0].attempts.is_empty());
        assert_eq!(s.remaining_seconds(), 0);
    }

    #[test]
    fn test_empty_sequence_ends_on_begin() {
        let (mut s, sink) = session(0, 1);
        assert_eq!(s.phase(), Phase::Instructions);
        s.proceed();

        assert!(s.is_ended());
        assert!(!s.is_session_clock_running());
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].reason, EndReason::Completed);
        assert!(delivered[0].attempts.is_empty());
    }

    #[test]
    fn test_pointer_only_records_while_tracing() {
        let (mut s, _) = session(2, 1);
        s.pointer_down(Point::new(10.0, 10.0));
        s.pointer_move(Point::new(20.0, 20.0));
        s.pointer_up();
        assert!(s.capture().strokes().is_empty());
        assert_eq!(s.capture().pointer(), Some(Point::new(20.0, 20.0)));

        s.proceed();
        s.pointer_down(Point::new(10.0, 10.0));
        s.pointer_move(Point::new(20.0, 20.0));
        s.pointer_move(Point::new(30.0, 20.0));
        s.pointer_up();
        assert_eq!(s.capture().strokes().len(), 1);
        assert_eq!(s.capture().strokes()[0].len(), 3);

        s.proceed();
        s.pointer_down(Point::new(50.0, 50.0));
        s.pointer_move(Point::new(60.0, 60.0));
        assert_eq!(s.capture().strokes().len(), 1);
        assert!(s.capture().active().is_none());

        s.proceed();
        assert!(s.capture().strokes().is_empty());
    }

    #[test]
    fn test_finish_closes_active_stroke() {
        let (mut s, _) = session(1, 1);
        s.proceed();
        s.pointer_down(Point::new(10.0, 10.0));
        s.pointer_move(Point::new(20.0, 20.0));
        s.proceed();

        assert_eq!(s.phase(), Phase::Result);
        assert_eq!(s.capture().strokes().len(), 1);
        assert!(s.capture().active().is_none());
    }

    #[test]
    fn test_pointer_mapping_applies() {
        let (mut s, _) = session(1, 1);
        s.set_surface_mapping(SurfaceMapping::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)));
        s.proceed();
        s.pointer_down(Point::new(6.0, 7.0));

        assert_eq!(s.capture().pointer(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_offset_is_stable_and_bounded() {
        let (mut s, _) = session(2, 1);
        s.proceed();
        let first = s.figure_origin();
        assert_eq!(s.figure_origin(), first);
        assert!((first.x - 540.0).abs() <= 54.0);
        assert!((first.y - 405.0).abs() <= 40.5);

        s.proceed();
        s.proceed();
        let second = s.figure_origin();
        assert!(s.offsets().get(&FigureId::new("f0")).is_some());
        assert!(s.offsets().get(&FigureId::new("f1")).is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn test_frame_mode_follows_phase() {
        let (mut s, _) = session(1, 1);
        assert_eq!(s.frame().mode, RenderMode::Blank);
        s.proceed();
        assert_eq!(s.frame().mode, RenderMode::Tracing);
        s.proceed();
        assert_eq!(s.frame().mode, RenderMode::Comparison);
        s.proceed();
        assert_eq!(s.frame().mode, RenderMode::Blank);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Session::new(
            config(0),
            figures(1),
            Box::new(CollectingSink::new()),
            StdRng::seed_from_u64(0),
        );
        assert_matches!(result, Err(SessionError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_debug_shows_progress() {
        let (mut s, _) = session(3, 10);
        s.proceed();
        let text = format!("{s:?}");
        assert!(text.starts_with("Session {"));
        assert!(text.contains("phase: Tracing"));
        assert!(text.contains("figures: 3"));
        assert!(text.ends_with(".. }"));
    }

    #[test]
    fn test_prepare_requires_setup() {
        let store = MemoryKvStore::new();
        let result = Session::prepare(
            &store,
            Box::new(CollectingSink::new()),
            StdRng::seed_from_u64(0),
        );
        assert_matches!(result, Err(SessionError::Config(ConfigError::Missing)));
    }

    #[test]
    fn test_prepare_shuffles_configured_pool() {
        let store = MemoryKvStore::new();
        crate::config::save_session_config(&store, &config(2)).unwrap();

        let s = Session::prepare(&store, Box::new(CollectingSink::new()), StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(s.figure_count(), 17);
        assert_eq!(s.remaining_seconds(), 120);
    }

    #[test]
    fn test_store_sink_writes_stats() {
        let store = MemoryKvStore::new();
        let mut sink = StoreStatsSink::new(store);
        let stats = SessionStats {
            attempts: vec![],
            reason: EndReason::Terminated,
            finished_at: Local::now(),
        };
        sink.deliver(&stats);

        let saved = sink.store.get(SESSION_STATS_KEY).unwrap().unwrap();
        assert_eq!(saved["reason"], "terminated");
        assert_eq!(saved["attempts"], serde_json::json!([]));
    }

    #[test]
    fn test_stats_summary() {
        let figure = Figure::shape("circle", FigureKind::Geometric, Difficulty::Easy);
        let stats = SessionStats {
            attempts: vec![
                FigureAttemptStat {
                    figure: figure.clone(),
                    elapsed_seconds: 4,
                    completed: true,
                },
                FigureAttemptStat {
                    figure,
                    elapsed_seconds: 7,
                    completed: true,
                },
            ],
            reason: EndReason::Completed,
            finished_at: Local::now(),
        };
        assert_eq!(stats.completed_count(), 2);
        assert_eq!(stats.total_seconds(), 11);
        assert_eq!(stats.average_seconds(), Some(5.5));
        assert_eq!(EndReason::TimeExpired.to_string(), "time expired");
    }
}
