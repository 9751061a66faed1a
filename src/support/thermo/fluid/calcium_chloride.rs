use crate::support::thermo::PropertyTable;

use super::{BRINE_CONCENTRATIONS, REFRIGERANT_TEMPERATURES};

const VISCOSITY: [[f64; 11]; 6] = [
    [
        0.00553, 0.005353, 0.005184, 0.005023, 0.004869, 0.004722, 0.004582, 0.004447, 0.004319,
        0.004197, 0.004079,
    ],
    [
        0.005854, 0.005665, 0.005485, 0.005314, 0.005151, 0.004995, 0.004847, 0.004705, 0.004569,
        0.00444, 0.004316,
    ],
    [
        0.006217, 0.006015, 0.005823, 0.005641, 0.005467, 0.005301, 0.005143, 0.004992, 0.004848,
        0.00471, 0.004579,
    ],
    [
        0.006627, 0.00641, 0.006204, 0.006007, 0.005821, 0.005643, 0.005474, 0.005313, 0.005159,
        0.005012, 0.004872,
    ],
    [
        0.007093, 0.006858, 0.006635, 0.006423, 0.006221, 0.00603, 0.005848, 0.005674, 0.005509,
        0.005351, 0.0052,
    ],
    [
        0.007627, 0.00737, 0.007127, 0.006896, 0.006677, 0.006469, 0.006272, 0.006084, 0.005905,
        0.005734, 0.005572,
    ],
];

const CONDUCTIVITY: [[f64; 11]; 6] = [
    [0.5253, 0.5267, 0.5281, 0.5296, 0.531, 0.5324, 0.5338, 0.5352, 0.5366, 0.5381, 0.5395],
    [0.524, 0.5254, 0.5268, 0.5283, 0.5297, 0.5311, 0.5325, 0.5339, 0.5353, 0.5367, 0.5381],
    [0.5227, 0.5241, 0.5255, 0.5269, 0.5284, 0.5298, 0.5312, 0.5326, 0.534, 0.5354, 0.5368],
    [0.5214, 0.5228, 0.5242, 0.5256, 0.527, 0.5285, 0.5299, 0.5313, 0.5327, 0.5341, 0.5355],
    [0.5201, 0.5215, 0.5229, 0.5243, 0.5258, 0.5272, 0.5286, 0.53, 0.5314, 0.5328, 0.5342],
    [0.5189, 0.5203, 0.5217, 0.5231, 0.5245, 0.5259, 0.5273, 0.5287, 0.5301, 0.5315, 0.5329],
];

const PRANDTL: [[f64; 11]; 6] = [
    [29.87, 28.87, 27.91, 27.00, 26.13, 25.31, 24.52, 23.76, 23.04, 22.35, 21.69],
    [31.35, 30.29, 29.28, 28.32, 27.41, 26.54, 25.71, 24.92, 24.16, 23.44, 22.75],
    [33.02, 31.90, 30.83, 29.82, 28.85, 27.93, 27.05, 26.22, 25.42, 24.66, 23.93],
    [34.93, 33.73, 32.59, 31.51, 30.48, 29.50, 28.57, 27.68, 26.83, 26.03, 25.26],
    [37.10, 35.81, 34.58, 33.42, 32.32, 31.27, 30.27, 29.33, 28.42, 27.56, 26.74],
    [39.59, 38.19, 36.86, 35.60, 34.41, 33.28, 32.20, 31.18, 30.21, 29.29, 28.41],
];

const SPECIFIC_HEAT: [[f64; 11]; 6] = [
    [2837.0, 2840.0, 2844.0, 2847.0, 2850.0, 2853.0, 2856.0, 2859.0, 2863.0, 2866.0, 2869.0],
    [2806.0, 2809.0, 2812.0, 2815.0, 2819.0, 2822.0, 2825.0, 2828.0, 2831.0, 2834.0, 2837.0],
    [2777.0, 2780.0, 2783.0, 2786.0, 2789.0, 2792.0, 2794.0, 2797.0, 2800.0, 2803.0, 2806.0],
    [2748.0, 2751.0, 2754.0, 2757.0, 2760.0, 2762.0, 2765.0, 2768.0, 2771.0, 2774.0, 2776.0],
    [2721.0, 2723.0, 2726.0, 2729.0, 2731.0, 2734.0, 2736.0, 2739.0, 2742.0, 2744.0, 2747.0],
    [2693.0, 2696.0, 2698.0, 2700.0, 2703.0, 2705.0, 2708.0, 2710.0, 2712.0, 2715.0, 2717.0],
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

/// Calcium chloride brine, one table per entry of [`BRINE_CONCENTRATIONS`].
pub(super) static TABLES: [PropertyTable<11>; BRINE_CONCENTRATIONS.len()] =
    [table(0), table(1), table(2), table(3), table(4), table(5)];
