use crate::support::thermo::PropertyTable;

use super::REFRIGERANT_TEMPERATURES;

/// Saturated liquid ammonia.
pub(super) static TABLE: PropertyTable<11> = PropertyTable::from_columns(
    REFRIGERANT_TEMPERATURES,
    [
        0.000_190_3,
        0.000_188_1,
        0.000_186,
        0.000_183_9,
        0.000_181_8,
        0.000_179_8,
        0.000_177_8,
        0.000_175_9,
        0.000_174,
        0.000_172_1,
        0.000_170_2,
    ],
    [
        0.5902, 0.5871, 0.584, 0.5809, 0.5778, 0.5747, 0.5717, 0.5686, 0.5655, 0.5625, 0.5594,
    ],
    [
        1.471, 1.464, 1.456, 1.449, 1.442, 1.436, 1.429, 1.423, 1.416, 1.41, 1.404,
    ],
    [
        4563.0, 4568.0, 4573.0, 4578.0, 4583.0, 4589.0, 4594.0, 4599.0, 4604.0, 4610.0, 4615.0,
    ],
);
