//! [`ActorEntity`] implementation for [`Shipment`] and its state machine.
//!
//! ```text
//! Processing --Depart--> InTransit --Advance--> OutForDelivery --Deliver--> Delivered
//!     |                      \________________________________/
//!     +--Cancel--> Cancelled
//! ```
//!
//! Status never moves backwards. Once cancelled, every step is refused with
//! [`Transition::Halted`].

use super::actions::{Advanced, ShipmentAction, ShipmentActionResult, Transition};
use super::ShipmentError;
use crate::model::{
    Coordinates, Shipment, ShipmentCreate, ShipmentId, ShipmentStatus, StallReason, TrackingTime,
    HALFWAY_AT, PROCESSING_CENTER,
};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracker_actor::ActorEntity;

impl Shipment {
    fn is_cancelled(&self) -> bool {
        self.status == ShipmentStatus::Cancelled
    }

    fn invalid(&self, step: &'static str) -> ShipmentError {
        ShipmentError::InvalidTransition {
            step,
            status: self.status,
        }
    }

    fn set_status(&mut self, status: ShipmentStatus) {
        self.status = status;
        self.location = status.location_label().to_string();
    }

    fn resolve(
        &mut self,
        origin: Coordinates,
        route: Vec<Coordinates>,
        expected_arrival: DateTime<Local>,
    ) -> Result<Transition, ShipmentError> {
        if self.is_cancelled() {
            return Ok(Transition::Halted);
        }
        if self.is_routed() {
            return Err(ShipmentError::RouteAlreadyResolved(self.id.to_string()));
        }
        if route.is_empty() {
            return Err(ShipmentError::EmptyRoute(self.id.to_string()));
        }
        if self.status != ShipmentStatus::Processing {
            return Err(self.invalid("resolve"));
        }

        self.coordinates = Some(origin);
        self.route = route;
        self.expected_arrival = TrackingTime::At(expected_arrival);
        self.location = PROCESSING_CENTER.to_string();
        Ok(Transition::Unchanged)
    }

    fn depart(&mut self) -> Result<Transition, ShipmentError> {
        if self.is_cancelled() {
            return Ok(Transition::Halted);
        }
        if self.status != ShipmentStatus::Processing || !self.is_routed() {
            return Err(self.invalid("depart"));
        }
        self.set_status(ShipmentStatus::InTransit);
        Ok(Transition::Changed(ShipmentStatus::InTransit))
    }

    fn advance(&mut self, waypoint: Coordinates, progress: f64) -> Result<Advanced, ShipmentError> {
        if self.is_cancelled() {
            return Ok(Advanced {
                transition: Transition::Halted,
                halfway: false,
            });
        }
        if !matches!(
            self.status,
            ShipmentStatus::InTransit | ShipmentStatus::OutForDelivery
        ) {
            return Err(self.invalid("advance"));
        }

        let target = ShipmentStatus::for_progress(progress).max(self.status);
        let transition = if target == self.status {
            Transition::Unchanged
        } else {
            Transition::Changed(target)
        };

        self.coordinates = Some(waypoint);
        self.set_status(target);

        let halfway = progress >= HALFWAY_AT && !self.halfway_reached;
        self.halfway_reached |= halfway;

        Ok(Advanced {
            transition,
            halfway,
        })
    }

    fn deliver(
        &mut self,
        destination: Coordinates,
        at: DateTime<Local>,
    ) -> Result<Transition, ShipmentError> {
        if self.is_cancelled() {
            return Ok(Transition::Halted);
        }
        if !matches!(
            self.status,
            ShipmentStatus::InTransit | ShipmentStatus::OutForDelivery
        ) {
            return Err(self.invalid("deliver"));
        }
        self.set_status(ShipmentStatus::Delivered);
        self.arrival_date = TrackingTime::At(at);
        self.coordinates = Some(destination);
        Ok(Transition::Changed(ShipmentStatus::Delivered))
    }

    fn stall(&mut self, reason: StallReason) -> Result<Transition, ShipmentError> {
        if self.is_cancelled() {
            return Ok(Transition::Halted);
        }
        if self.status != ShipmentStatus::Processing {
            return Err(self.invalid("stall"));
        }
        self.stall = Some(reason);
        Ok(Transition::Unchanged)
    }

    fn cancel(&mut self) -> bool {
        if self.status != ShipmentStatus::Processing {
            return false;
        }
        self.status = ShipmentStatus::Cancelled;
        true
    }
}

#[async_trait]
impl ActorEntity for Shipment {
    type Id = ShipmentId;
    type Create = ShipmentCreate;
    type Update = ();
    type Action = ShipmentAction;
    type ActionResult = ShipmentActionResult;
    type Context = ();
    type Error = ShipmentError;

    fn from_create_params(id: ShipmentId, params: ShipmentCreate) -> Result<Self, Self::Error> {
        Ok(Self::placed(id, params))
    }

    /// Shipments are only changed through actions.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ShipmentAction,
        _ctx: &(),
    ) -> Result<ShipmentActionResult, Self::Error> {
        match action {
            ShipmentAction::Resolve {
                origin,
                route,
                expected_arrival,
            } => self
                .resolve(origin, route, expected_arrival)
                .map(ShipmentActionResult::Resolve),
            ShipmentAction::Depart => self.depart().map(ShipmentActionResult::Depart),
            ShipmentAction::Advance { waypoint, progress } => self
                .advance(waypoint, progress)
                .map(ShipmentActionResult::Advance),
            ShipmentAction::Deliver { destination, at } => self
                .deliver(destination, at)
                .map(ShipmentActionResult::Deliver),
            ShipmentAction::Stall(reason) => self.stall(reason).map(ShipmentActionResult::Stall),
            ShipmentAction::Cancel => Ok(ShipmentActionResult::Cancel(self.cancel())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;

    fn placed() -> Shipment {
        Shipment::placed(
            ShipmentId(424242),
            ShipmentCreate {
                order_id: OrderId(1),
                recipient: Some("alice@example.com".into()),
                origin_address: "origin".into(),
                destination_address: "destination".into(),
                item_count: 2,
                total_cost: 40.0,
            },
        )
    }

    fn route(n: usize) -> Vec<Coordinates> {
        (0..n).map(|i| Coordinates::new(i as f64, i as f64)).collect()
    }

    fn departed(n: usize) -> Shipment {
        let mut shipment = placed();
        shipment
            .resolve(Coordinates::new(0.0, 0.0), route(n), Local::now())
            .unwrap();
        shipment.depart().unwrap();
        shipment
    }

    #[test]
    fn resolve_places_the_shipment_at_the_origin() {
        let mut shipment = placed();
        let origin = Coordinates::new(42.0, -83.0);

        let transition = shipment.resolve(origin, route(4), Local::now()).unwrap();

        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(shipment.status, ShipmentStatus::Processing);
        assert_eq!(shipment.location, "Processing Center");
        assert_eq!(shipment.coordinates, Some(origin));
        assert!(matches!(shipment.expected_arrival, TrackingTime::At(_)));
    }

    #[test]
    fn route_is_set_once() {
        let mut shipment = placed();
        shipment
            .resolve(Coordinates::new(0.0, 0.0), route(4), Local::now())
            .unwrap();

        let err = shipment
            .resolve(Coordinates::new(9.0, 9.0), route(7), Local::now())
            .unwrap_err();

        assert_eq!(err, ShipmentError::RouteAlreadyResolved("424242".into()));
        assert_eq!(shipment.route, route(4));
    }

    #[test]
    fn depart_requires_a_route() {
        let mut shipment = placed();
        assert!(matches!(
            shipment.depart(),
            Err(ShipmentError::InvalidTransition { step: "depart", .. })
        ));
    }

    #[test]
    fn advance_switches_to_out_for_delivery_at_three_quarters() {
        let mut shipment = departed(4);
        let steps: Vec<Advanced> = route(4)
            .into_iter()
            .enumerate()
            .map(|(i, waypoint)| shipment.advance(waypoint, i as f64 / 4.0).unwrap())
            .collect();

        assert_eq!(steps[0].transition, Transition::Unchanged);
        assert_eq!(steps[1].transition, Transition::Unchanged);
        assert_eq!(steps[2].transition, Transition::Unchanged);
        assert_eq!(
            steps[3].transition,
            Transition::Changed(ShipmentStatus::OutForDelivery)
        );
        assert_eq!(shipment.location, "Out for Delivery");
        assert_eq!(shipment.coordinates, Some(Coordinates::new(3.0, 3.0)));
    }

    #[test]
    fn halfway_is_reported_exactly_once() {
        let mut shipment = departed(10);
        let halfway_steps = (0..10)
            .filter(|i| {
                shipment
                    .advance(Coordinates::new(0.0, 0.0), *i as f64 / 10.0)
                    .unwrap()
                    .halfway
            })
            .count();

        assert_eq!(halfway_steps, 1);
        assert!(shipment.halfway_reached);
    }

    #[test]
    fn status_never_moves_backwards() {
        let mut shipment = departed(4);
        shipment.advance(Coordinates::new(0.0, 0.0), 0.8).unwrap();

        let step = shipment.advance(Coordinates::new(1.0, 1.0), 0.1).unwrap();

        assert_eq!(step.transition, Transition::Unchanged);
        assert_eq!(shipment.status, ShipmentStatus::OutForDelivery);
    }

    #[test]
    fn deliver_lands_on_the_destination() {
        let mut shipment = departed(2);
        let destination = Coordinates::new(42.5, -82.9);
        let at = Local::now();

        let transition = shipment.deliver(destination, at).unwrap();

        assert_eq!(transition, Transition::Changed(ShipmentStatus::Delivered));
        assert_eq!(shipment.location, "Delivered");
        assert_eq!(shipment.coordinates, Some(destination));
        assert_eq!(shipment.arrival_date, TrackingTime::At(at));
    }

    #[test]
    fn cancel_only_from_processing() {
        let mut processing = placed();
        assert!(processing.cancel());
        assert!(!processing.cancel(), "second cancel must be refused");
        assert_eq!(processing.status, ShipmentStatus::Cancelled);

        let mut moving = departed(4);
        assert!(!moving.cancel());
        assert_eq!(moving.status, ShipmentStatus::InTransit);
    }

    #[test]
    fn cancelled_shipment_halts_every_step() {
        let mut shipment = placed();
        shipment.cancel();

        let resolved = shipment
            .resolve(Coordinates::new(0.0, 0.0), route(4), Local::now())
            .unwrap();
        assert_eq!(resolved, Transition::Halted);
        assert_eq!(shipment.depart().unwrap(), Transition::Halted);
        assert_eq!(
            shipment.stall(StallReason::RouteUnavailable).unwrap(),
            Transition::Halted
        );
        assert!(shipment
            .advance(Coordinates::new(1.0, 1.0), 0.5)
            .unwrap()
            .transition
            .is_halted());

        assert_eq!(shipment.status, ShipmentStatus::Cancelled);
        assert!(shipment.route.is_empty());
        assert_eq!(shipment.coordinates, None);
        assert!(!shipment.halfway_reached);
        assert_eq!(shipment.stall, None);
    }

    #[test]
    fn stall_keeps_processing_status() {
        let mut shipment = placed();
        let reason = StallReason::GeocodeFailed {
            address: "origin".into(),
        };

        assert_eq!(shipment.stall(reason.clone()).unwrap(), Transition::Unchanged);
        assert_eq!(shipment.status, ShipmentStatus::Processing);
        assert_eq!(shipment.stall, Some(reason));
    }
}
