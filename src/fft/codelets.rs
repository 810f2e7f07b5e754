use super::DFTBase;
use num_complex::Complex64;
use num_traits::Zero;
use std::f64::consts::PI;

/// Computes sin(pi * a / b).
#[inline(always)]
fn sab(a: f64, b: f64) -> f64 {
    (PI * a / b).sin()
}

/// Computes cos(pi * a / b).
#[inline(always)]
fn cab(a: f64, b: f64) -> f64 {
    (PI * a / b).cos()
}

/// Returns the imaginary-unit complex constant.
#[inline(always)]
fn i_c() -> Complex64 {
    Complex64::new(0.0, 1.0)
}

/// Straight-line DFT kernel for one fixed small size.
pub trait DftKernel {
    fn transform(x: &[Complex64], out: &mut [Complex64]);
}

/// Kernel for size-1 DFT.
pub struct Kernel1;
impl DftKernel for Kernel1 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        out[0] = x[0];
    }
}

/// Kernel for size-2 DFT.
pub struct Kernel2;
impl DftKernel for Kernel2 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        out[0] = x[0] + x[1];
        out[1] = x[0] - x[1];
    }
}

/// Kernel for size-3 DFT.
pub struct Kernel3;
impl DftKernel for Kernel3 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        let t0 = (x[1] - x[2]) * sab(1.0, 3.0) * i_c();
        let u0 = x[1] + x[2];
        let u1 = x[0] - u0 * 0.5;
        out[0] = x[0] + u0;
        out[1] = u1 - t0;
        out[2] = u1 + t0;
    }
}

/// Kernel for size-4 DFT.
pub struct Kernel4;
impl DftKernel for Kernel4 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        let t0 = x[0] + x[2];
        let t1 = x[3] + x[1];
        let u0 = x[0] - x[2];
        let u1 = (x[3] - x[1]) * i_c();
        out[0] = t0 + t1;
        out[1] = u0 + u1;
        out[2] = t0 - t1;
        out[3] = u0 - u1;
    }
}

/// Kernel for size-5 DFT.
pub struct Kernel5;
impl DftKernel for Kernel5 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        let a = 0.25;
        let b = sab(2.0, 5.0);
        let c = sab(1.0, 5.0);
        let d = cab(1.0, 5.0) - a;

        let t0 = x[1] + x[4];
        let t1 = x[2] + x[3];
        let t2 = (t0 - t1) * d;
        let u0 = x[1] - x[4];
        let u1 = x[2] - x[3];
        let u2 = t0 + t1;
        let u3 = x[0] - u2 * a;
        let t4 = u3 + t2;
        let t5 = (u0 * b + u1 * c) * i_c();

        out[0] = x[0] + u2;

        let u4 = u3 - t2;
        let u5 = (u1 * b - u0 * c) * i_c();

        out[1] = t4 - t5;
        out[2] = u4 + u5;
        out[4] = t4 + t5;
        out[3] = u4 - u5;
    }
}

/// Kernel for size-6 DFT.
pub struct Kernel6;
impl DftKernel for Kernel6 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        let a = 0.5;
        let b = sab(1.0, 3.0);

        let t0 = x[0] + x[3];
        let t1 = x[4] + x[1];
        let t2 = x[2] + x[5];
        let t3 = t0 - (t1 + t2) * a;
        let t4 = (t1 - t2) * i_c();

        let u0 = x[0] - x[3];
        let u1 = x[4] - x[1];
        let u2 = x[2] - x[5];
        let u3 = u0 - (u1 + u2) * a;
        let u4 = (u1 - u2) * i_c();

        out[0] = t0 + t1 + t2;
        out[1] = u3 + u4 * b;
        out[4] = t3 + t4 * b;
        out[3] = u0 + u1 + u2;
        out[5] = u3 - u4 * b;
        out[2] = t3 - t4 * b;
    }
}

/// Kernel for size-8 DFT.
pub struct Kernel8;
impl DftKernel for Kernel8 {
    #[inline(always)]
    fn transform(x: &[Complex64], out: &mut [Complex64]) {
        let a = sab(1.0, 4.0);
        let t0 = x[7] - x[3];
        let t1 = x[1] - x[5];
        let t2 = x[0] + x[4];
        let t3 = x[2] + x[6];
        let t4 = (t0 + t1) * a;
        let u0 = x[7] + x[3];
        let u1 = x[1] + x[5];
        let u2 = x[0] - x[4];
        let u3 = x[2] - x[6];
        let u4 = (t0 - t1) * a;
        let t5 = t2 + t3;
        let t6 = u2 + t4;
        let t7 = u0 + u1;
        let t8 = (u4 - u3) * i_c();
        let u5 = t2 - t3;
        let u6 = u2 - t4;
        let u7 = (u0 - u1) * i_c();
        let u8 = (u4 + u3) * i_c();

        out[0] = t5 + t7;
        out[1] = t6 + t8;
        out[2] = u5 + u7;
        out[3] = u6 + u8;
        out[4] = t5 - t7;
        out[7] = t6 - t8;
        out[6] = u5 - u7;
        out[5] = u6 - u8;
    }
}

/// Small-size DFT: gathers each strided sequence, applies the kernel, and
/// scatters the result. Parameterized by kernel type and transform size.
pub struct DftCodelet<K: DftKernel, const N: usize> {
    _marker: std::marker::PhantomData<K>,
}

impl<K: DftKernel + Send + Sync + 'static, const N: usize> DftCodelet<K, N> {
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<K: DftKernel + Send + Sync + 'static, const N: usize> Default for DftCodelet<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DftKernel + Send + Sync + 'static, const N: usize> DFTBase for DftCodelet<K, N> {
    fn name(&self) -> String {
        format!("Codelet_{}", N)
    }

    fn size(&self) -> usize {
        N
    }

    fn is_inplace(&self) -> bool {
        true
    }

    fn xform_many(
        &self,
        input: &[Complex64],
        output: &mut [Complex64],
        istep: usize,
        istep2: usize,
        ostep: usize,
        ostep2: usize,
        count: usize,
    ) {
        let mut x = [Complex64::zero(); N];
        let mut out = [Complex64::zero(); N];

        for b in 0..count {
            for (a, slot) in x.iter_mut().enumerate() {
                *slot = input[a * istep + b * istep2];
            }

            K::transform(&x, &mut out);

            for (a, value) in out.iter().enumerate() {
                output[a * ostep + b * ostep2] = *value;
            }
        }
    }
}
