//! Shape filtering
//!
//! Keeps components whose coordinate covariance is elongated: the ratio
//! of the major to the (floored) minor eigenvalue must exceed
//! `min_ratio`. Near-isotropic clusters, whose two eigenvalues are
//! close, are rejected.

use crate::config::ShapeFilterConfig;
use crate::error::SegmentResult;
use histmap_region::Component;

/// Eigenvalue ratio of a component.
pub fn elongation(component: &Component, config: &ShapeFilterConfig) -> SegmentResult<f64> {
    Ok(component.covariance()?.eigen_ratio(config.eigen_floor))
}

/// Whether the component passes the filter.
pub fn keep_component(component: &Component, config: &ShapeFilterConfig) -> SegmentResult<bool> {
    Ok(elongation(component, config)? > config.min_ratio)
}

/// Retain the components that pass the filter, preserving order.
pub fn filter_components(
    components: Vec<Component>,
    config: &ShapeFilterConfig,
) -> SegmentResult<Vec<Component>> {
    let mut kept = Vec::with_capacity(components.len());
    for component in components {
        if keep_component(&component, config)? {
            kept.push(component);
        }
    }
    Ok(kept)
}
