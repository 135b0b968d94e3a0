pub mod quad;
pub mod rect;
pub mod region;

pub use quad::{QuadList, WindowQuad, WindowVertex};
pub use rect::{Margins, Rect};
pub use region::Region;
