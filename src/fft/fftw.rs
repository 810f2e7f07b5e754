use super::DFTBase;
use fftw::array::AlignedVec;
use fftw::error::Error as FftwError;
use fftw::plan::*;
use fftw::types::*;
use num_complex::Complex64;
use parking_lot::Mutex;

/// FFTW3 wrapper providing a dedicated internal buffer and plan.
/// The internal state is guarded by a mutex because FFTW plan/buffer
/// combinations are not thread-safe under concurrent writes.
pub struct DftFftw {
    n: usize,
    state: Mutex<InternalState>,
}

struct InternalState {
    plan: C2CPlan64,
    input: AlignedVec<c64>,
    output: AlignedVec<c64>,
}

// SAFETY: the plan and its buffers are only touched behind the mutex.
unsafe impl Send for InternalState {}

impl DftFftw {
    pub fn new(n: usize) -> Result<Self, FftwError> {
        let mut input = AlignedVec::new(n);
        let mut output = AlignedVec::new(n);

        //
        // Create a forward FFT plan with MEASURE.
        //
        let plan = C2CPlan::aligned(&[n], Sign::Forward, Flag::MEASURE)?;
        input.iter_mut().for_each(|c| *c = c64::default());
        output.iter_mut().for_each(|c| *c = c64::default());

        Ok(Self {
            n,
            state: Mutex::new(InternalState {
                plan,
                input,
                output,
            }),
        })
    }
}

impl DFTBase for DftFftw {
    fn name(&self) -> String {
        format!("FFTW({})", self.n)
    }

    fn size(&self) -> usize {
        self.n
    }

    fn is_inplace(&self) -> bool {
        //
        // Externally behaves as an in-place transform due to internal buffering.
        //
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
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let n = self.n;

        for k in 0..count {
            for i in 0..n {
                state.input[i] = input[k * istep2 + i * istep];
            }

            if let Err(err) = state.plan.c2c(&mut state.input, &mut state.output) {
                log::error!("FFTW execution failed for N={}: {}", n, err);
                return;
            }

            for i in 0..n {
                output[k * ostep2 + i * ostep] = state.output[i];
            }
        }
    }
}
