use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::collections::HashMap;

lazy_static! {
    //
    // Global PrimeLore instance protected by a mutex.
    //
    static ref PRIME_LORE: Mutex<PrimeLore> = Mutex::new(PrimeLore::new());
}

struct PrimeLore {
    smallest_factors: HashMap<usize, usize>,
    primes: Vec<usize>, // Ordered list of known primes.
    last_prime: usize,
    sieved_to: usize, // Every prime up to here is in `primes`.
}

impl PrimeLore {
    fn new() -> Self {
        let mut s = Self {
            smallest_factors: HashMap::from([(0, 0), (1, 1), (2, 2)]),
            primes: vec![2],
            last_prime: 2,
            sieved_to: 0,
        };

        //
        // Warm the cache with image-sized factorizations.
        //
        for i in 0..1024 {
            s.find(i);
        }
        s.sieved_to = 1023;
        s
    }

    fn find(&mut self, n: usize) -> usize {
        if let Some(&f) = self.smallest_factors.get(&n) {
            return f;
        }

        let mut solution = n;

        //
        // Check divisibility using already known primes (ordered).
        //
        for &p in &self.primes {
            if p * p > n {
                break;
            }
            if n % p == 0 {
                solution = p;
                break;
            }
        }

        //
        // Continue searching for a divisor using odd candidates.
        //
        if solution == n {
            let mut p = (self.sieved_to + 1).max(3) | 1;
            while p * p <= n {
                if n % p == 0 {
                    solution = p;
                    break;
                }
                p += 2;
            }
        }

        //
        // No divisor: n is prime, record it in order.
        //
        if solution == n {
            if n > self.last_prime {
                self.primes.push(n);
                self.last_prime = n;
            } else if let Err(pos) = self.primes.binary_search(&n) {
                self.primes.insert(pos, n);
            }
        }

        self.smallest_factors.insert(n, solution);
        solution
    }
}

/// Prime factorization of `n` in ascending order, plus the factor count.
/// Returns an empty list for 0 and 1.
pub fn get_factors_all(mut n: usize) -> (Vec<usize>, usize) {
    let mut factors = Vec::with_capacity(16);

    if n <= 1 {
        return (factors, 0);
    }

    let mut lore = PRIME_LORE.lock();

    loop {
        let f = lore.find(n);
        factors.push(f);

        //
        // If n equals its smallest factor, factorization is complete.
        //
        if f == n {
            break;
        }
        n /= f;
    }

    let count = factors.len();
    (factors, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_come_out_ascending() {
        assert_eq!(get_factors_all(360), (vec![2, 2, 2, 3, 3, 5], 6));
        assert_eq!(get_factors_all(97), (vec![97], 1));
        assert_eq!(get_factors_all(1), (vec![], 0));
        assert_eq!(get_factors_all(0), (vec![], 0));
    }

    #[test]
    fn large_primes_beyond_the_warm_cache() {
        assert_eq!(get_factors_all(104_729), (vec![104_729], 1));
        assert_eq!(get_factors_all(2 * 7919), (vec![2, 7919], 2));
    }
}
