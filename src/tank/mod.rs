//! 탱크 환기 관련 계산 모듈 모음.

pub mod flow_field;
pub mod geometry;
pub mod report;
pub mod streamlines;
pub mod ventilation;

pub use flow_field::*;
pub use geometry::*;
pub use ventilation::*;
