use crate::config::FinderOptions;
use crate::criteria::FilterCriteria;
use crate::error::{ControllerError, FetchError};
use crate::models::{Location, RestaurantRecord, SelectionResult};
use crate::presentation::{
    cuisine_options, listing_views, marker_views, popup_view, RenderInstruction,
};
use crate::request::{normalize_postcode, FetchRequest};
use crate::selection::{enumerate_cuisines, select_top};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Input the view layer reports to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Geocoder result; `place_name` starts with the postcode.
    PostcodeSelected { place_name: String, center: Location },
    FiltersApplied(FilterCriteria),
    /// Marker or list row at this position of the current selection.
    RecordClicked(usize),
    FilterPanelOpened,
    FilterPanelClosed,
}

/// Tags a fetch so only the most recently issued one may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub ticket: RequestTicket,
    pub request: FetchRequest,
}

#[derive(Debug, Default)]
pub struct Transition {
    pub instructions: Vec<RenderInstruction>,
    pub fetch: Option<PendingFetch>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub working_set: Vec<RestaurantRecord>,
    pub selection: SelectionResult,
    pub cuisines: Vec<String>,
    pub last_postcode: Option<String>,
    pub last_center: Option<Location>,
    pub filters: FilterCriteria,
    pub open_popup: Option<usize>,
    pub highlighted: Option<usize>,
    pub filter_panel_open: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Owns the working set and turns events into render instructions.
///
/// Fetching is left to the caller: a transition may carry a [`PendingFetch`]
/// whose outcome is handed back through [`Controller::complete_fetch`].
pub struct Controller {
    options: FinderOptions,
    state: AppState,
    next_ticket: u64,
    awaiting: Option<InFlight>,
}

/// The latest issued request; its postcode, center and filters become state
/// only once its response is applied.
#[derive(Debug)]
struct InFlight {
    ticket: RequestTicket,
    request: FetchRequest,
    center: Option<Location>,
}

impl Controller {
    pub fn new(options: FinderOptions) -> Self {
        Self {
            options,
            state: AppState::default(),
            next_ticket: 0,
            awaiting: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn options(&self) -> &FinderOptions {
        &self.options
    }

    pub fn initial_view(&self) -> RenderInstruction {
        RenderInstruction::FlyTo {
            center: self.options.default_center,
            zoom: self.options.default_zoom,
        }
    }

    pub fn handle(&mut self, event: Event) -> Result<Transition, ControllerError> {
        match event {
            Event::PostcodeSelected { place_name, center } => {
                let postcode = normalize_postcode(&place_name)?;
                let request = FetchRequest::new(&postcode, FilterCriteria::default())?;

                let mut instructions = self.dismiss_popup();
                instructions.push(RenderInstruction::FlyTo {
                    center,
                    zoom: self.options.postcode_zoom,
                });

                Ok(Transition {
                    instructions,
                    fetch: Some(self.issue(request, Some(center))),
                })
            }
            Event::FiltersApplied(criteria) => {
                let postcode = self
                    .state
                    .last_postcode
                    .clone()
                    .ok_or(ControllerError::NoPostcode)?;
                let request = FetchRequest::new(&postcode, criteria)?;
                self.state.filter_panel_open = false;

                let mut instructions = self.dismiss_popup();
                if let Some(center) = self.state.last_center {
                    instructions.push(RenderInstruction::FlyTo {
                        center,
                        zoom: self.options.filter_zoom,
                    });
                }
                instructions.push(RenderInstruction::CloseFilterPanel);

                Ok(Transition {
                    instructions,
                    fetch: Some(self.issue(request, None)),
                })
            }
            Event::RecordClicked(index) => {
                let record =
                    self.state
                        .selection
                        .get(index)
                        .ok_or(ControllerError::IndexOutOfRange {
                            index,
                            len: self.state.selection.len(),
                        })?;

                let instructions = vec![
                    RenderInstruction::FlyTo {
                        center: record.position(),
                        zoom: self.options.record_zoom,
                    },
                    RenderInstruction::ClearPopups,
                    RenderInstruction::OpenPopup(popup_view(index, record)),
                    RenderInstruction::Highlight { index },
                ];
                self.state.open_popup = Some(index);
                self.state.highlighted = Some(index);

                Ok(Transition {
                    instructions,
                    fetch: None,
                })
            }
            Event::FilterPanelOpened => {
                self.state.filter_panel_open = true;
                Ok(Transition {
                    instructions: vec![
                        RenderInstruction::PopulateCuisines(cuisine_options(&self.state.cuisines)),
                        RenderInstruction::OpenFilterPanel,
                    ],
                    fetch: None,
                })
            }
            Event::FilterPanelClosed => {
                self.state.filter_panel_open = false;
                Ok(Transition {
                    instructions: vec![RenderInstruction::CloseFilterPanel],
                    fetch: None,
                })
            }
        }
    }

    /// Applies the outcome of a fetch issued by [`Controller::handle`].
    ///
    /// Responses to superseded requests are dropped. A failed fetch leaves the
    /// working set and the rendered view as they were.
    pub fn complete_fetch(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<RestaurantRecord>, FetchError>,
    ) -> Vec<RenderInstruction> {
        let in_flight = match self.awaiting.take() {
            Some(in_flight) if in_flight.ticket == ticket => in_flight,
            latest => {
                warn!(
                    ?ticket,
                    latest = ?latest.as_ref().map(|in_flight| in_flight.ticket),
                    "dropping stale restaurant response"
                );
                self.awaiting = latest;
                return Vec::new();
            }
        };

        match outcome {
            Ok(records) => {
                let InFlight {
                    request, center, ..
                } = in_flight;
                self.state.last_postcode = Some(request.postcode);
                self.state.filters = request.criteria;
                if center.is_some() {
                    self.state.last_center = center;
                }
                self.replace_working_set(records)
            }
            Err(error) => {
                warn!(
                    %error,
                    postcode = %in_flight.request.postcode,
                    "restaurant fetch failed, keeping previous results"
                );
                Vec::new()
            }
        }
    }

    /// Recomputes the selection over the current working set.
    pub fn reselect(&mut self) -> Vec<RenderInstruction> {
        let records = std::mem::take(&mut self.state.working_set);
        self.replace_working_set(records)
    }

    fn issue(&mut self, request: FetchRequest, center: Option<Location>) -> PendingFetch {
        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.awaiting = Some(InFlight {
            ticket,
            request: request.clone(),
            center,
        });
        PendingFetch { ticket, request }
    }

    fn dismiss_popup(&mut self) -> Vec<RenderInstruction> {
        self.state.open_popup = None;
        self.state.highlighted = None;
        vec![RenderInstruction::ClearPopups, RenderInstruction::ClearHighlight]
    }

    fn replace_working_set(&mut self, records: Vec<RestaurantRecord>) -> Vec<RenderInstruction> {
        let selection = select_top(&records, self.options.result_limit);
        let cuisines = enumerate_cuisines(&records);
        info!(
            fetched = records.len(),
            shown = selection.len(),
            cuisines = cuisines.len(),
            "working set replaced"
        );

        let mut instructions = self.dismiss_popup();
        let placeholder = self.options.placeholder_logo.as_str();
        instructions.extend([
            RenderInstruction::ReplaceMarkers(marker_views(&selection, placeholder)),
            RenderInstruction::ReplaceListings(listing_views(&selection, placeholder)),
            RenderInstruction::ShowFilterButton,
            RenderInstruction::PopulateCuisines(cuisine_options(&cuisines)),
        ]);

        self.state.working_set = records;
        self.state.selection = selection;
        self.state.cuisines = cuisines;
        self.state.fetched_at = Some(Utc::now());
        instructions
    }
}
