use rustc_hash::FxHashMap;

use hv_core::Vec2;

/// `(column, row, layer)` of a bucket.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub col:   i32,
    pub row:   i32,
    pub layer: u8,
}

/// Square buckets of side `bucket_size` px, kept separately per height
/// layer (`round(clamp(z, 0, 2))`).  Stores indices into the caller's slice.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    bucket_size: f32,
    buckets:     FxHashMap<BucketKey, Vec<usize>>,
    len:         usize,
}

impl SpatialHash {
    /// `bucket_size` below 1 px is raised to 1.
    pub fn new(bucket_size: f32) -> Self {
        Self { bucket_size: sane_size(bucket_size), buckets: FxHashMap::default(), len: 0 }
    }

    pub fn bucket_size(&self) -> f32 {
        self.bucket_size
    }

    /// Change the bucket size; empties the hash.
    pub fn set_bucket_size(&mut self, bucket_size: f32) {
        self.bucket_size = sane_size(bucket_size);
        self.buckets.clear();
        self.len = 0;
    }

    #[inline]
    pub fn layer_of(z: f32) -> u8 {
        if z.is_nan() {
            return 0;
        }
        z.clamp(0.0, 2.0).round() as u8
    }

    #[inline]
    pub fn key_of(&self, pos: Vec2, z: f32) -> BucketKey {
        BucketKey {
            col:   (pos.x / self.bucket_size).floor() as i32,
            row:   (pos.y / self.bucket_size).floor() as i32,
            layer: Self::layer_of(z),
        }
    }

    /// Remove every entry.  Buckets that were in use keep their allocation
    /// for the next rebuild; buckets left empty last time are dropped.
    pub fn clear(&mut self) {
        self.buckets.retain(|_, v| {
            let keep = !v.is_empty();
            v.clear();
            keep
        });
        self.len = 0;
    }

    pub fn insert(&mut self, index: usize, pos: Vec2, z: f32) {
        let key = self.key_of(pos, z);
        self.buckets.entry(key).or_default().push(index);
        self.len += 1;
    }

    /// Clear and insert `(pos, z)` items under their position in the iterator.
    pub fn rebuild(&mut self, items: impl IntoIterator<Item = (Vec2, f32)>) {
        self.clear();
        for (i, (pos, z)) in items.into_iter().enumerate() {
            self.insert(i, pos, z);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket(&self, key: BucketKey) -> &[usize] {
        match self.buckets.get(&key) {
            Some(v) => v,
            None => &[],
        }
    }

    /// Entries in the bucket of `(pos, z)` and its eight planar neighbours
    /// on the same layer.
    pub fn query(&self, pos: Vec2, z: f32) -> impl Iterator<Item = usize> + '_ {
        let centre = self.key_of(pos, z);
        (-1..=1).flat_map(move |dr| {
            (-1..=1).flat_map(move |dc| {
                let key = BucketKey { col: centre.col + dc, row: centre.row + dr, layer: centre.layer };
                self.bucket(key).iter().copied()
            })
        })
    }
}

fn sane_size(size: f32) -> f32 {
    if size.is_finite() { size.max(1.0) } else { 1.0 }
}
