//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{ClockPort, MessagingPort, RankingApiPort};
use crate::stores::SessionRegistry;
use crate::use_cases;
use crate::use_cases::components::{ExpireSessions, HandleComponent};
use crate::use_cases::fractals::{BrowseFractals, FractalHelp, OpenSession, SearchFractals};

/// Main application state.
///
/// Owns the session registry and every use case. Passed to HTTP handlers
/// via Axum state and to the expiry sweeper.
pub struct App {
    pub registry: Arc<SessionRegistry>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub fractals: use_cases::FractalUseCases,
    pub components: use_cases::ComponentUseCases,
}

impl App {
    pub fn new(
        ranking: Arc<dyn RankingApiPort>,
        messaging: Arc<dyn MessagingPort>,
        clock: Arc<dyn ClockPort>,
        session_timeout: Duration,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::new());

        let open = Arc::new(OpenSession::new(
            ranking,
            messaging.clone(),
            clock,
            registry.clone(),
            session_timeout,
        ));

        let fractals = use_cases::FractalUseCases::new(
            Arc::new(BrowseFractals::new(open.clone(), messaging.clone())),
            Arc::new(SearchFractals::new(open, messaging.clone())),
            Arc::new(FractalHelp::new(messaging.clone())),
            messaging.clone(),
        );

        let components = use_cases::ComponentUseCases::new(
            Arc::new(HandleComponent::new(registry.clone(), messaging.clone())),
            Arc::new(ExpireSessions::new(registry.clone(), messaging)),
        );

        Self {
            registry,
            use_cases: UseCases {
                fractals,
                components,
            },
        }
    }
}
