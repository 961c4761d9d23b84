use crate::config::{GridConfig, GridTier};
use crate::core::{DisplayMode, GridPlane, GridSet, Orientation};

/// Produces the layered grid planes for a scale and display mode.
#[derive(Clone, Debug, PartialEq)]
pub struct GridBuilder {
    tiers: Vec<GridTier>,
    base_size: f64,
    divisions: u32,
    plane_offset: f64,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

impl GridBuilder {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            tiers: config.tiers.clone(),
            base_size: config.base_size,
            divisions: config.divisions,
            plane_offset: config.plane_offset,
        }
    }

    /// Builds a fresh set; nothing is carried over from earlier calls.
    ///
    /// Plane sizes are in grid-local units. The binding layer scales the whole
    /// group by [`GridSet::content_scale`].
    pub fn build(&self, scale: f64, mode: DisplayMode) -> GridSet {
        let per_tier = if mode.is_3d() { 3 } else { 1 };
        let mut planes = Vec::with_capacity(self.tiers.len() * per_tier);

        for (index, tier) in self.tiers.iter().enumerate() {
            let plane = |orientation: Orientation, offset: f64| GridPlane {
                orientation,
                tier: index,
                color: tier.color,
                size: self.base_size * tier.factor,
                divisions: self.divisions,
                offset,
            };

            planes.push(plane(Orientation::XY, self.plane_offset));
            if mode.is_3d() {
                planes.push(plane(Orientation::XZ, 0.0));
                planes.push(plane(Orientation::YZ, self.plane_offset));
            }
        }

        GridSet {
            scale,
            mode,
            planes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn tiers_keep_their_order_and_colors() {
        let set = GridBuilder::default().build(1.0, DisplayMode::ThreeD);
        let xy: Vec<_> = set
            .planes
            .iter()
            .filter(|p| p.orientation == Orientation::XY)
            .collect();
        assert_eq!(
            xy.iter().map(|p| p.color.to_hex()).collect::<Vec<_>>(),
            vec![0x555555, 0x444444, 0x333333, 0x222222]
        );
        assert_eq!(
            xy.iter().map(|p| p.size).collect::<Vec<_>>(),
            vec![100.0, 1000.0, 10000.0, 100000.0]
        );
        assert_eq!(set.planes[1].orientation, Orientation::XZ);
        assert_eq!(set.planes[1].offset, 0.0);
        assert_eq!(set.planes[2].orientation, Orientation::YZ);
        assert_eq!(set.planes[2].offset, -0.0001);
    }

    #[test]
    fn custom_tiers_are_respected() {
        let config = GridConfig {
            tiers: vec![GridTier {
                factor: 2.0,
                color: Color::WHITE,
            }],
            base_size: 10.0,
            divisions: 4,
            plane_offset: 0.0,
        };
        let set = GridBuilder::new(&config).build(10.0, DisplayMode::TwoD);
        assert_eq!(set.planes.len(), 1);
        assert_eq!(set.planes[0].size, 20.0);
        assert_eq!(set.content_scale(), 10.0);
    }
}
