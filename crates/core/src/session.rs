use crate::config::FinderOptions;
use crate::controller::{AppState, Controller, Event};
use crate::error::ControllerError;
use crate::presentation::RenderInstruction;
use crate::traits::RestaurantSource;

/// Drives a [`Controller`] against a restaurant source, one event at a time.
pub struct Session<S>
where
    S: RestaurantSource,
{
    source: S,
    controller: Controller,
}

impl<S> Session<S>
where
    S: RestaurantSource + Send + Sync,
{
    pub fn new(source: S, options: FinderOptions) -> Self {
        Self {
            source,
            controller: Controller::new(options),
        }
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Handles `event`, performing the fetch it triggers before returning.
    pub async fn dispatch(
        &mut self,
        event: Event,
    ) -> Result<Vec<RenderInstruction>, ControllerError> {
        let transition = self.controller.handle(event)?;
        let mut instructions = transition.instructions;

        if let Some(pending) = transition.fetch {
            let outcome = self.source.fetch_restaurants(&pending.request).await;
            instructions.extend(self.controller.complete_fetch(pending.ticket, outcome));
        }

        Ok(instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::fixtures::{names, record};
    use crate::{FetchError, FetchRequest, FilterCriteria, Location, RestaurantRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers each fetch with the next scripted outcome and records requests.
    struct ScriptedSource {
        outcomes: Mutex<Vec<Result<Vec<RestaurantRecord>, FetchError>>>,
        requests: Mutex<Vec<FetchRequest>>,
    }

    impl ScriptedSource {
        fn new(mut outcomes: Vec<Result<Vec<RestaurantRecord>, FetchError>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RestaurantSource for ScriptedSource {
        async fn fetch_restaurants(
            &self,
            request: &FetchRequest,
        ) -> Result<Vec<RestaurantRecord>, FetchError> {
            self.requests.lock().expect("lock").push(request.clone());
            self.outcomes
                .lock()
                .expect("lock")
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn postcode_event() -> Event {
        Event::PostcodeSelected {
            place_name: "EC4M 7RF, London".to_string(),
            center: Location::new(51.5166, -0.1031),
        }
    }

    #[tokio::test]
    async fn search_then_failed_filter_keeps_view() {
        let source = ScriptedSource::new(vec![
            Ok(vec![
                record("A", 4.5, 10),
                record("B", 4.5, 20),
                record("C", 4.9, 1),
            ]),
            Err(FetchError::UnknownPostcode("EC4M 7RF".to_string())),
        ]);
        let mut session = Session::new(source, FinderOptions::default());

        let rendered = session.dispatch(postcode_event()).await.expect("search");
        assert!(rendered.contains(&RenderInstruction::ShowFilterButton));
        assert_eq!(names(&session.state().selection), vec!["C", "B", "A"]);

        let rendered = session
            .dispatch(Event::FiltersApplied(FilterCriteria {
                cuisine: Some("thai".to_string()),
                ..FilterCriteria::default()
            }))
            .await
            .expect("filters");
        assert!(!rendered
            .iter()
            .any(|instruction| matches!(instruction, RenderInstruction::ReplaceListings(_))));
        assert_eq!(names(&session.state().selection), vec!["C", "B", "A"]);

        let requests = session.source.requests.lock().expect("lock");
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].criteria.cuisine.as_deref(), Some("thai"));
    }

    #[tokio::test]
    async fn listing_rows_match_markers() {
        let records: Vec<_> = (0..12)
            .map(|i| record(&format!("R{i}"), f64::from(i % 5), i))
            .collect();
        let source = ScriptedSource::new(vec![Ok(records)]);
        let mut session = Session::new(source, FinderOptions::default());

        let rendered = session.dispatch(postcode_event()).await.expect("search");
        let markers = rendered.iter().find_map(|instruction| match instruction {
            RenderInstruction::ReplaceMarkers(markers) => Some(markers),
            _ => None,
        });
        let listings = rendered.iter().find_map(|instruction| match instruction {
            RenderInstruction::ReplaceListings(listings) => Some(listings),
            _ => None,
        });

        let (markers, listings) = (markers.expect("markers"), listings.expect("listings"));
        assert_eq!(markers.len(), 10);
        assert_eq!(listings.len(), 10);
        for (position, (marker, listing)) in markers.iter().zip(listings).enumerate() {
            assert_eq!(marker.index, position);
            assert_eq!(listing.index, position);
            assert_eq!(listing.name, session.state().selection[position].name);
        }
    }
}
