//! Geohash encoding used to coarse-grain locations for map clustering.

use crate::geo::Point;

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Encodes `point` as a geohash of `precision` characters.
pub fn encode(point: &Point, precision: usize) -> String {
	let mut lat_range = (-90.0_f64, 90.0_f64);
	let mut lng_range = (-180.0_f64, 180.0_f64);
	let mut out = String::with_capacity(precision);
	let mut even_bit = true;
	let mut bit = 0_u8;
	let mut idx = 0_usize;

	while out.len() < precision {
		let (range, value) =
			if even_bit { (&mut lng_range, point.lng) } else { (&mut lat_range, point.lat) };
		let mid = (range.0 + range.1) / 2.0;

		idx <<= 1;

		if value >= mid {
			idx |= 1;
			range.0 = mid;
		} else {
			range.1 = mid;
		}

		even_bit = !even_bit;
		bit += 1;

		if bit == 5 {
			out.push(BASE32[idx] as char);

			bit = 0;
			idx = 0;
		}
	}

	out
}

/// Shortens a geohash to at most `precision` characters.
pub fn truncate(hash: &str, precision: usize) -> &str {
	match hash.char_indices().nth(precision) {
		Some((end, _)) => &hash[..end],
		None => hash,
	}
}
