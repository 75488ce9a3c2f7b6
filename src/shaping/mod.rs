//! Chart data shaping: sufficiency gate, encoders and scaling helpers

mod encode;
mod gate;
mod scale;

pub(crate) use encode::{
    CategorySeries, CloudWord, EncodedPoint, Encoding, HeatGrid, RadarEncoding, ShapeError,
    Slice, StackedSeries, encode,
};
pub(crate) use gate::{ChartKind, RenderPlan, SlotData, assess};
pub(crate) use scale::Rgb;
