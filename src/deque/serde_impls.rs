//! A `Deque` serializes as a plain sequence, front to back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Deque;

impl<T: Serialize> Serialize for Deque<T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Deque<T> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let vec = <Vec<T> as Deserialize<'de>>::deserialize(deserializer)?;
        Ok(Deque::from(vec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut deque: Deque<u32> = (1..6).collect();
        deque.rotate(3);
        deque.unshift(0);
        let json = serde_json::to_string(&deque).unwrap();
        assert_eq!(json, "[0,4,5,1,2,3]");

        let back: Deque<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, deque);
        assert_eq!(back.capacity(), 8);
    }
}
