use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, used verbatim and never normalized.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Point {
	pub lat: f64,
	pub lng: f64,
}
impl Point {
	pub fn new(lat: f64, lng: f64) -> Self {
		Self { lat, lng }
	}

	pub fn is_valid(&self) -> bool {
		self.lat.is_finite()
			&& self.lng.is_finite()
			&& (-90.0..=90.0).contains(&self.lat)
			&& (-180.0..=180.0).contains(&self.lng)
	}

	/// Planar Euclidean distance in degrees.
	pub fn planar_distance(&self, other: &Point) -> f64 {
		let d_lat = self.lat - other.lat;
		let d_lng = self.lng - other.lng;

		(d_lat * d_lat + d_lng * d_lng).sqrt()
	}
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoundingBox {
	pub min_lng: f64,
	pub min_lat: f64,
	pub max_lng: f64,
	pub max_lat: f64,
}
impl BoundingBox {
	pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
		Self { min_lng, min_lat, max_lng, max_lat }
	}

	pub fn is_valid(&self) -> bool {
		[self.min_lng, self.min_lat, self.max_lng, self.max_lat].iter().all(|v| v.is_finite())
			&& self.min_lng <= self.max_lng
			&& self.min_lat <= self.max_lat
	}

	/// Edges are inclusive.
	pub fn contains(&self, point: &Point) -> bool {
		point.lng >= self.min_lng
			&& point.lng <= self.max_lng
			&& point.lat >= self.min_lat
			&& point.lat <= self.max_lat
	}

	pub fn centroid(&self) -> Point {
		Point {
			lat: (self.min_lat + self.max_lat) / 2.0,
			lng: (self.min_lng + self.max_lng) / 2.0,
		}
	}
}
