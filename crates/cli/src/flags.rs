use clap::ValueEnum;
use codegraph_engine::{ResolutionSchedule, StrategyKind};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ScheduleFlag {
    Deferred,
    Interleaved,
}

impl ScheduleFlag {
    pub(crate) const fn as_domain(self) -> ResolutionSchedule {
        match self {
            ScheduleFlag::Deferred => ResolutionSchedule::Deferred,
            ScheduleFlag::Interleaved => ResolutionSchedule::Interleaved,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum StrategyFlag {
    Syntactic,
    Scoped,
}

impl StrategyFlag {
    pub(crate) const fn as_domain(self) -> StrategyKind {
        match self {
            StrategyFlag::Syntactic => StrategyKind::Syntactic,
            StrategyFlag::Scoped => StrategyKind::Scoped,
        }
    }
}
