use crate::common::{DirectionalStyle, Measure, PrintOrientation};
use serde::{Deserialize, Serialize};

/// Page geometry declared by a master page or page element.
///
/// Page layouts do not cascade; a backend reports the layout of the page
/// element the cursor is on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub width: Option<Measure>,
    pub height: Option<Measure>,
    pub print_orientation: Option<PrintOrientation>,
    pub margin: DirectionalStyle<Measure>,
}
