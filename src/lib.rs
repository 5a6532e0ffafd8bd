//! # Chained Hash Map
//!
//! A string-keyed hash table built from plain vectors, using separate chaining
//! for collisions and load-factor driven growth.
//!
//! Keys are placed with a polynomial rolling hash over their UTF-16 code units,
//! reduced modulo the bucket count. Each bucket holds an ordered chain of
//! entries. When a new key would push `len / capacity` above the load factor
//! threshold (0.75 by default), the bucket count doubles and every entry is
//! hashed again under the new capacity.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chained_hashmap::StringHashMap;
//!
//! // Create a new hash map with 16 buckets
//! let mut map = StringHashMap::new();
//!
//! // Insert values
//! map.set("apple", "red");
//! map.set("banana", "yellow");
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&"red"));
//! assert!(map.has("banana"));
//!
//! // Update values in place
//! assert_eq!(map.set("apple", "green"), Some("red"));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! assert!(map.remove("apple"));
//! assert!(!map.remove("apple"));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chained_hashmap::StringHashMap;
//!
//! let mut map = StringHashMap::new();
//! for i in 0..12 {
//!     map.set(format!("key-{i}"), i);
//! }
//! // 12 / 16 sits exactly on the threshold
//! assert_eq!(map.capacity(), 16);
//!
//! // The 13th key would exceed it, so the table doubles first
//! map.set("key-12", 12);
//! assert_eq!(map.capacity(), 32);
//! assert_eq!(map.get("key-0"), Some(&0));
//!
//! // Clearing restores the initial bucket count
//! map.clear();
//! assert_eq!(map.capacity(), 16);
//! assert!(map.is_empty());
//! ```

/// Module implementing the chains stored in each bucket
mod bucket;
/// Module defining the error raised by the internal bounds check
mod error;
/// Module implementing the bucket hash function
pub mod hash;
/// Module implementing the single-threaded chained hash map
mod string_hash_map;
/// Utility functions for the hash map
pub mod utils;

pub use error::HashMapError;
pub use string_hash_map::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, Iter, StringHashMap};
pub use utils::ChainStats;
