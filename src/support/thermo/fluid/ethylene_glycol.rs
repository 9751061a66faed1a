use crate::support::thermo::PropertyTable;

use super::{BRINE_CONCENTRATIONS, REFRIGERANT_TEMPERATURES};

const VISCOSITY: [[f64; 11]; 6] = [
    [
        0.005531, 0.0053, 0.005082, 0.004876, 0.00468, 0.004494, 0.004318, 0.004151, 0.003992,
        0.003841, 0.003698,
    ],
    [
        0.005713, 0.005474, 0.005248, 0.005033, 0.00483, 0.004637, 0.004454, 0.004281, 0.004116,
        0.003959, 0.003811,
    ],
    [
        0.005902, 0.005654, 0.005418, 0.005195, 0.004984, 0.004784, 0.004594, 0.004414, 0.004244,
        0.004081, 0.003927,
    ],
    [
        0.006098, 0.005839, 0.005595, 0.005363, 0.005144, 0.004936, 0.004739, 0.004552, 0.004375,
        0.004207, 0.004047,
    ],
    [
        0.006299, 0.006031, 0.005776, 0.005536, 0.005308, 0.005093, 0.004888, 0.004694, 0.004511,
        0.004336, 0.004171,
    ],
    [
        0.006508, 0.006228, 0.005964, 0.005715, 0.005478, 0.005254, 0.005042, 0.004841, 0.00465,
        0.004469, 0.004298,
    ],
];

const CONDUCTIVITY: [[f64; 11]; 6] = [
    [0.4538, 0.4549, 0.456, 0.4571, 0.4582, 0.4593, 0.4604, 0.4615, 0.4626, 0.4637, 0.4648],
    [0.4502, 0.4513, 0.4524, 0.4535, 0.4546, 0.4557, 0.4567, 0.4578, 0.4589, 0.4599, 0.461],
    [0.4467, 0.4478, 0.4488, 0.4499, 0.4509, 0.452, 0.453, 0.4541, 0.4551, 0.4562, 0.4572],
    [0.4432, 0.4442, 0.4452, 0.4463, 0.4473, 0.4483, 0.4493, 0.4504, 0.4514, 0.4524, 0.4534],
    [0.4397, 0.4407, 0.4417, 0.4427, 0.4437, 0.4447, 0.4457, 0.4467, 0.4477, 0.4487, 0.4497],
    [0.4362, 0.4371, 0.4381, 0.4391, 0.4401, 0.4411, 0.442, 0.443, 0.444, 0.445, 0.4459],
];

const PRANDTL: [[f64; 11]; 6] = [
    [45.57, 43.59, 41.72, 39.95, 38.28, 36.70, 35.20, 33.77, 32.43, 31.15, 29.93],
    [47.17, 45.11, 43.17, 41.34, 39.60, 37.95, 36.40, 34.92, 33.52, 32.19, 30.94],
    [48.82, 46.69, 44.67, 42.76, 40.96, 39.25, 37.64, 36.10, 34.65, 33.27, 31.97],
    [50.53, 48.31, 46.22, 44.24, 42.36, 40.59, 38.91, 37.32, 35.81, 34.39, 33.03],
    [52.29, 49.99, 47.81, 45.76, 43.81, 41.97, 40.23, 38.58, 37.01, 35.53, 34.13],
    [54.12, 51.72, 49.46, 47.32, 45.30, 43.39, 41.58, 39.87, 38.25, 36.71, 35.25],
];

const SPECIFIC_HEAT: [[f64; 11]; 6] = [
    [3739.0, 3741.0, 3744.0, 3746.0, 3748.0, 3751.0, 3753.0, 3756.0, 3758.0, 3760.0, 3763.0],
    [3717.0, 3719.0, 3722.0, 3725.0, 3727.0, 3730.0, 3732.0, 3735.0, 3737.0, 3740.0, 3742.0],
    [3695.0, 3698.0, 3700.0, 3703.0, 3706.0, 3708.0, 3711.0, 3714.0, 3716.0, 3719.0, 3722.0],
    [3672.0, 3675.0, 3678.0, 3681.0, 3684.0, 3687.0, 3689.0, 3692.0, 3695.0, 3698.0, 3701.0],
    [3650.0, 3653.0, 3656.0, 3659.0, 3662.0, 3665.0, 3668.0, 3671.0, 3674.0, 3677.0, 3680.0],
    [3627.0, 3630.0, 3633.0, 3636.0, 3640.0, 3643.0, 3646.0, 3649.0, 3652.0, 3655.0, 3658.0],
];

const fn table(index: usize) -> PropertyTable<11> {
    PropertyTable::from_columns(
        REFRIGERANT_TEMPERATURES,
        VISCOSITY[index],
        CONDUCTIVITY[index],
        PRANDTL[index],
        SPECIFIC_HEAT[index],
    )
}

/// Ethylene glycol brine, one table per entry of [`BRINE_CONCENTRATIONS`].
pub(super) static TABLES: [PropertyTable<11>; BRINE_CONCENTRATIONS.len()] =
    [table(0), table(1), table(2), table(3), table(4), table(5)];
