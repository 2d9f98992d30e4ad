//! Customer and time window types.

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;

/// A time window `[ready, due]` during which service at a client may begin.
///
/// Arriving before `ready` means waiting; starting after `due` is a
/// violation, which this crate reports but never prevents.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.ready() <= tw.due());
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "(f64, f64)", try_from = "(f64, f64)")]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// The window `[0, +inf)` used for clients without an explicit window.
    pub fn unbounded() -> Self {
        Self {
            ready: 0.0,
            due: f64::INFINITY,
        }
    }

    /// Earliest allowable service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable service start.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Returns `true` if starting service at `start` is too late.
    pub fn is_violated(&self, start: f64) -> bool {
        start > self.due
    }
}

impl TryFrom<(f64, f64)> for TimeWindow {
    type Error = InstanceError;

    fn try_from((ready, due): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(ready, due).ok_or(InstanceError::InvalidTimeWindow { ready, due })
    }
}

impl From<TimeWindow> for (f64, f64) {
    fn from(tw: TimeWindow) -> Self {
        (tw.ready, tw.due)
    }
}

/// A client (or the depot) of a VRPTW instance.
///
/// Client 0 is the depot by convention. Each client has a location, a
/// demand, a service duration and an optional time window.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::Customer;
///
/// let depot = Customer::depot(35.0, 35.0);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Customer::new(1, 41.0, 49.0, 10, 10.0);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    service_duration: f64,
    #[serde(default)]
    time_window: Option<TimeWindow>,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, service_duration: f64) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            service_duration,
            time_window: None,
        }
    }

    /// Creates a depot at the given coordinates (id=0, demand=0).
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(0, x, y, 0, 0.0)
    }

    /// Sets a time window for this customer.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Customer ID (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service duration at this customer.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    /// Time window constraint, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.ready(), 10.0);
        assert_eq!(tw.due(), 20.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_violated() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(!tw.is_violated(5.0));
        assert!(!tw.is_violated(20.0));
        assert!(tw.is_violated(20.1));
    }

    #[test]
    fn test_unbounded_window() {
        let tw = TimeWindow::unbounded();
        assert_eq!(tw.ready(), 0.0);
        assert!(tw.contains(1e12));
        assert!(!tw.is_violated(f64::MAX));
    }

    #[test]
    fn test_time_window_serde() {
        let tw: TimeWindow = serde_json::from_str("[5.0, 20.0]").expect("valid");
        assert_eq!(tw, TimeWindow::new(5.0, 20.0).expect("valid"));
        assert_eq!(serde_json::to_string(&tw).expect("serialize"), "[5.0,20.0]");
        assert!(serde_json::from_str::<TimeWindow>("[20.0, 5.0]").is_err());
    }

    #[test]
    fn test_customer_new() {
        let c = Customer::new(1, 10.0, 20.0, 5, 3.0);
        assert_eq!(c.id(), 1);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 20.0);
        assert_eq!(c.demand(), 5);
        assert_eq!(c.service_duration(), 3.0);
        assert!(c.time_window().is_none());
    }

    #[test]
    fn test_customer_deserialize_without_window() {
        let json = r#"{"id":2,"x":1.0,"y":2.0,"demand":4,"service_duration":10.0}"#;
        let c: Customer = serde_json::from_str(json).expect("valid");
        assert_eq!(c.id(), 2);
        assert_eq!(c.demand(), 4);
        assert!(c.time_window().is_none());
    }

    #[test]
    fn test_customer_distance() {
        let a = Customer::new(0, 0.0, 0.0, 0, 0.0);
        let b = Customer::new(1, 3.0, 4.0, 0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }
}
